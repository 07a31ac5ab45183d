//! testmatrix Core - Hexagonal Architecture Implementation
//!
//! This crate expands a declarative description of what to test (servers,
//! target frameworks, deployment types, architectures, and for module-hosted
//! servers module versions and hosting models) into the ordered list of
//! concrete test variants that are valid on the current machine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          testmatrix-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │             (MatrixService)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (PlatformProbe)              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   testmatrix-adapters (Infrastructure)  │
//! │      (HostPlatform, FixedPlatform)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (VariantSpec, VariantList, Variant)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use testmatrix_core::prelude::*;
//!
//! let env = Environment::new(OsFamily::Windows, "x86_64");
//! let variants = VariantSpec::for_servers([ServerKind::ReverseProxyModule])
//!     .with_frameworks([FrameworkMoniker::NetCoreApp22])
//!     .with_all_module_versions()
//!     .with_all_hosting_models()
//!     .build(&env)
//!     .unwrap();
//!
//! assert_eq!(variants.len(), 3);
//! for case in variants.cases() {
//!     println!("{case}");
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{MatrixService, PlatformProbe};
    pub use crate::domain::{
        AppDeploymentType, Architecture, Environment, FrameworkMoniker, HostingModel,
        ModuleVersion, OsFamily, ServerKind, TestCase, Variant, VariantList, VariantSpec,
    };
    pub use crate::error::{MatrixError, MatrixResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
