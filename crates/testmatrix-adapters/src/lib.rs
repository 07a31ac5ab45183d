//! Infrastructure adapters for testmatrix.
//!
//! This crate implements the ports defined in `testmatrix-core::application::ports`.
//! It is the only place that reads facts about the running machine.

pub mod platform;

// Re-export commonly used adapters
pub use platform::{FixedPlatform, HostPlatform};
