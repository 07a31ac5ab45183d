//! Unified error handling for testmatrix-core.
//!
//! This module provides a unified error type that wraps domain errors and
//! platform-probe failures, with user-actionable suggestions.

use thiserror::Error;

use crate::domain::DomainError;

/// Root error type for testmatrix-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    /// Errors from the domain layer (configuration the matrix cannot expand).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The platform probe could not describe the running machine.
    #[error("Platform probe failed: {reason}")]
    Platform { reason: String },
}

impl MatrixError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Platform { reason } => vec![
                format!("Could not detect the host platform: {reason}"),
                "Simulate an environment instead, e.g. --os linux --cpu x86_64".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Platform { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MatrixResult<T> = Result<T, MatrixError>;
