//! Platform probe adapters.

mod fixed;
mod host;

pub use fixed::FixedPlatform;
pub use host::HostPlatform;
