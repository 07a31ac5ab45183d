//! The ambient facts a matrix is expanded against.

use std::fmt;

use crate::domain::{
    error::DomainError,
    value_objects::{Architecture, OsFamily},
};

/// What the platform probe reported about the machine running the build.
///
/// `cpu` is kept raw so that an unrecognized host architecture only becomes
/// an error when the architecture actually has to be inferred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment {
    os: OsFamily,
    cpu: String,
    target_framework: Option<String>,
}

impl Environment {
    pub fn new(os: OsFamily, cpu: impl Into<String>) -> Self {
        Self {
            os,
            cpu: cpu.into(),
            target_framework: None,
        }
    }

    /// Attach the compiled-target name of the calling code, e.g.
    /// `.NETCoreApp,Version=v2.1`.
    pub fn with_target_framework(mut self, name: impl Into<String>) -> Self {
        self.target_framework = Some(name.into());
        self
    }

    pub const fn os(&self) -> OsFamily {
        self.os
    }

    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    pub fn target_framework(&self) -> Option<&str> {
        self.target_framework.as_deref()
    }

    /// The host CPU as a matrix architecture.
    pub fn architecture(&self) -> Result<Architecture, DomainError> {
        Architecture::from_host(&self.cpu)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.cpu)?;
        if let Some(target) = &self.target_framework {
            write!(f, " ({target})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_target_when_present() {
        let env = Environment::new(OsFamily::Linux, "x86_64");
        assert_eq!(env.to_string(), "linux/x86_64");

        let env = env.with_target_framework(".NETCoreApp,Version=v2.1");
        assert_eq!(env.to_string(), "linux/x86_64 (.NETCoreApp,Version=v2.1)");
    }

    #[test]
    fn architecture_is_resolved_lazily() {
        let env = Environment::new(OsFamily::MacOs, "aarch64");
        assert_eq!(env.cpu(), "aarch64");
        assert!(env.architecture().is_err());
    }
}
