//! Probe for the machine the process runs on.

use testmatrix_core::{
    application::ports::PlatformProbe,
    domain::{Environment, OsFamily},
    error::MatrixResult,
};
use tracing::{debug, instrument};

/// Production probe backed by `std::env::consts`.
///
/// Rust binaries carry no runtime record of the framework a test suite was
/// compiled for, so the compiled-target name is supplied by the caller
/// (usually from configuration). Without it, framework inference fails
/// unless frameworks are requested explicitly.
#[derive(Debug, Clone, Default)]
pub struct HostPlatform {
    target_framework: Option<String>,
}

impl HostPlatform {
    /// Create a probe with no compiled-target name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `name` (e.g. `.NETCoreApp,Version=v2.1`) as the compiled target.
    pub fn with_target_framework(mut self, name: impl Into<String>) -> Self {
        self.target_framework = Some(name.into());
        self
    }

    /// The raw CPU name of the operating system.
    ///
    /// A 32-bit process on 64-bit Windows runs under WOW64, which reports
    /// the OS architecture in `PROCESSOR_ARCHITEW6432`. Elsewhere the
    /// compile target is taken as the OS architecture, so a 32-bit build on
    /// a 64-bit Linux or macOS host reports x86.
    pub fn cpu() -> String {
        os_architecture(
            std::env::consts::ARCH,
            std::env::var("PROCESSOR_ARCHITEW6432").ok().as_deref(),
        )
    }

    /// The OS family of this process.
    pub fn os() -> OsFamily {
        OsFamily::from_host(std::env::consts::OS)
    }

    /// Snapshot of the host without going through the port.
    pub fn environment(&self) -> Environment {
        let env = Environment::new(Self::os(), Self::cpu());
        match &self.target_framework {
            Some(name) => env.with_target_framework(name.clone()),
            None => env,
        }
    }
}

/// OS architecture from the process architecture and the WOW64 override.
fn os_architecture(process: &str, wow64: Option<&str>) -> String {
    match wow64.map(str::trim) {
        Some(native) if !native.is_empty() => native.to_owned(),
        _ => process.to_owned(),
    }
}

impl PlatformProbe for HostPlatform {
    #[instrument(skip(self))]
    fn probe(&self) -> MatrixResult<Environment> {
        let env = self.environment();
        debug!(
            os = %env.os(),
            cpu = env.cpu(),
            target_framework = ?env.target_framework(),
            "probed host platform"
        );
        Ok(env)
    }
}
