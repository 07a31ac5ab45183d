//! Application layer for testmatrix.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`MatrixService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//!
//! The application layer coordinates the domain layer but contains no
//! expansion rules itself. All rules live in `crate::domain`.

pub mod ports;
pub mod services;

pub use ports::PlatformProbe;
pub use services::MatrixService;
