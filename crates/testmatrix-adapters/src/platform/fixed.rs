//! Simulated platform for tests and CLI overrides.

use testmatrix_core::{
    application::ports::PlatformProbe,
    domain::{Environment, OsFamily},
    error::{MatrixError, MatrixResult},
};

/// A probe that always reports the same environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPlatform {
    env: Environment,
}

impl FixedPlatform {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Build from user-facing names, e.g. `("linux", "x86_64")`.
    ///
    /// The CPU name is kept raw so an unrecognized one still surfaces as
    /// an architecture error when the architecture has to be inferred.
    pub fn from_names(os: &str, cpu: &str) -> MatrixResult<Self> {
        let os: OsFamily = os.parse()?;
        let cpu = cpu.trim();
        if cpu.is_empty() {
            return Err(MatrixError::Platform {
                reason: "CPU architecture name is empty".into(),
            });
        }
        Ok(Self::new(Environment::new(os, cpu)))
    }

    /// Report `name` as the compiled target.
    pub fn with_target_framework(self, name: impl Into<String>) -> Self {
        Self::new(self.env.with_target_framework(name))
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }
}

impl From<Environment> for FixedPlatform {
    fn from(env: Environment) -> Self {
        Self::new(env)
    }
}

impl PlatformProbe for FixedPlatform {
    fn probe(&self) -> MatrixResult<Environment> {
        Ok(self.env.clone())
    }
}
