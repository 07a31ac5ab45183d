//! Driven (output) ports - implemented by infrastructure.
//!
//! The only thing the expansion needs from the outside world is a
//! description of the machine it runs on. The `testmatrix-adapters` crate
//! provides implementations.

use crate::domain::Environment;
use crate::error::MatrixResult;

/// Port for reading the ambient platform.
///
/// Implemented by:
/// - `testmatrix_adapters::HostPlatform` (the running machine)
/// - `testmatrix_adapters::FixedPlatform` (a simulated machine)
///
/// Called once per expansion; implementations should not cache anything
/// the caller might expect to change between calls.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformProbe: Send + Sync {
    /// OS family, raw CPU name, and compiled target of the caller.
    fn probe(&self) -> MatrixResult<Environment>;
}
