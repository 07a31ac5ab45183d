// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for testmatrix.
//!
//! This module contains the pure expansion logic with no I/O. The facts it
//! needs about the running machine arrive as an [`Environment`] value; how
//! they are probed is the application layer's business.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, environment, or platform calls
//! - **No tracing**: Only std library + thiserror + serde
//! - **Immutable values**: All domain objects are Clone + PartialEq
//! - **Rules in one place**: every compatibility rule lives in `capabilities`
//!
// Public API - what the world sees
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    Cases, Environment, ModuleHosting, TestCase, Variant, VariantList, VariantSpec,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    AppDeploymentType, Architecture, FrameworkMoniker, HostingModel, ModuleVersion, OsFamily,
    ServerKind,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Matrix-wide properties
    // ========================================================================

    fn environments() -> Vec<Environment> {
        vec![
            Environment::new(OsFamily::Windows, "x86_64"),
            Environment::new(OsFamily::Windows, "x86"),
            Environment::new(OsFamily::Linux, "x86_64"),
            Environment::new(OsFamily::MacOs, "x86_64"),
        ]
    }

    fn everything() -> VariantSpec {
        VariantSpec::for_servers(ServerKind::ALL)
            .with_frameworks(FrameworkMoniker::ALL)
            .with_all_app_types()
            .with_all_architectures()
            .with_all_hosting_models()
            .with_all_module_versions()
    }

    #[test]
    fn no_variant_violates_a_compatibility_rule() {
        for env in environments() {
            for variant in &everything().build(&env).unwrap() {
                let legacy = variant.framework().is_legacy();
                assert!(!(legacy && variant.app_type() == AppDeploymentType::Portable));
                if variant.hosting_model() == Some(HostingModel::InProcess) {
                    assert!(!legacy, "{variant}");
                    assert_eq!(variant.module_version(), Some(ModuleVersion::V2), "{variant}");
                }
            }
        }
    }

    #[test]
    fn module_fields_present_iff_module_hosted() {
        for env in environments() {
            for variant in &everything().build(&env).unwrap() {
                let hosted = variant.server().is_module_hosted();
                assert_eq!(variant.module_version().is_some(), hosted, "{variant}");
                assert_eq!(variant.hosting_model().is_some(), hosted, "{variant}");
            }
        }
    }

    #[test]
    fn every_variant_is_supported_on_its_environment() {
        for env in environments() {
            for variant in &everything().build(&env).unwrap() {
                assert!(
                    capabilities::server_supported_on(variant.server(), env.os()).unwrap(),
                    "{variant} on {env}"
                );
                assert!(capabilities::framework_supported_on(variant.framework(), env.os()));
            }
        }
    }

    #[test]
    fn building_twice_gives_identical_lists() {
        for env in environments() {
            let spec = everything();
            assert_eq!(spec.build(&env).unwrap(), spec.build(&env).unwrap());
        }
    }

    #[test]
    fn full_windows_matrix_has_expected_size() {
        // Plain servers: 7 framework/app-type cells (legacy is standalone only) × 2 archs.
        // Module servers: legacy cells allow 2 combinations, modern cells allow 3.
        let list = everything()
            .build(&Environment::new(OsFamily::Windows, "x86_64"))
            .unwrap();
        let plain = 2 * 7 * 2;
        let module = 2 * (2 * 2 + 6 * 2 * 3);
        assert_eq!(list.len(), plain + module);
    }
}
