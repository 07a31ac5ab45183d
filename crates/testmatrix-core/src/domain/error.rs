// ============================================================================
// domain/error.rs - MATRIX CONFIGURATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to carry across layers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// None of them are retryable: expansion is pure, so a second attempt in the
/// same environment fails the same way.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("unknown {dimension} '{value}'")]
    InvalidDimension {
        dimension: &'static str,
        value: String,
    },

    // ========================================================================
    // Configuration Errors (no usable default)
    // ========================================================================
    #[error("no framework specified and none could be inferred from target '{}'", .target_framework.as_deref().unwrap_or("<none>"))]
    FrameworkNotInferred { target_framework: Option<String> },

    #[error("unrecognized host architecture '{architecture}'")]
    UnrecognizedArchitecture { architecture: String },

    #[error("server '{server}' has no registered platform requirements")]
    UnclassifiedServer { server: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDimension { dimension, value } => vec![
                format!("'{value}' is not a known {dimension}"),
                "Run with --help to see accepted values".into(),
            ],
            Self::FrameworkNotInferred { target_framework } => {
                let mut out = vec!["Specify at least one framework, e.g. --framework netcoreapp2.1".into()];
                if let Some(name) = target_framework {
                    out.push(format!("Compiled target '{name}' does not map to a known moniker"));
                } else {
                    out.push("Or set defaults.target_framework in the config file".into());
                }
                out
            }
            Self::UnrecognizedArchitecture { architecture } => vec![
                format!("The host reports '{architecture}', which has no matching architecture"),
                "Pass the architectures explicitly, e.g. --arch x64".into(),
            ],
            Self::UnclassifiedServer { server } => vec![
                format!("Server '{server}' is missing from the server registry"),
                "This is a bug, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDimension { .. } => ErrorCategory::Validation,
            Self::FrameworkNotInferred { .. }
            | Self::UnrecognizedArchitecture { .. }
            | Self::UnclassifiedServer { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_not_inferred_message_names_target() {
        let err = DomainError::FrameworkNotInferred {
            target_framework: Some(".NETCoreApp,Version=v3.0".into()),
        };
        assert!(err.to_string().contains(".NETCoreApp,Version=v3.0"));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn framework_not_inferred_without_target() {
        let err = DomainError::FrameworkNotInferred {
            target_framework: None,
        };
        assert!(err.to_string().contains("<none>"));
        assert!(err.suggestions().iter().any(|s| s.contains("target_framework")));
    }

    #[test]
    fn invalid_dimension_is_validation() {
        let err = DomainError::InvalidDimension {
            dimension: "server",
            value: "apache".into(),
        };
        assert_eq!(err.to_string(), "unknown server 'apache'");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
