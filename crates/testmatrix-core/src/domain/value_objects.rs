//! Domain value objects: the matrix dimensions and the host OS family.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO compatibility logic. All rules live in `capabilities.rs`.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm, the `FromStr` arm, and extend `ALL`
//! 3. Add a registry entry in `capabilities.rs` (servers and frameworks)
//! 4. Done, nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn invalid(dimension: &'static str, value: &str) -> DomainError {
    DomainError::InvalidDimension {
        dimension,
        value: value.to_owned(),
    }
}

// ── ServerKind ───────────────────────────────────────────────────────────────

/// A server implementation an application can be hosted on.
///
/// To add a new server: add a variant here, then add a `ServerDef` in
/// `capabilities.rs`. No other files change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerKind {
    /// The cross-platform managed server. Runs everywhere.
    PrimaryManagedServer,
    /// Full reverse proxy hosting through the native module.
    ReverseProxyModule,
    /// Developer edition of the reverse proxy, same module.
    ReverseProxyModuleExpress,
    /// Kernel-mode HTTP stack.
    NativeHttpStack,
    /// Third-party reverse proxy in front of the managed server.
    ThirdPartyProxy,
}

impl ServerKind {
    pub const ALL: [Self; 5] = [
        Self::PrimaryManagedServer,
        Self::ReverseProxyModule,
        Self::ReverseProxyModuleExpress,
        Self::NativeHttpStack,
        Self::ThirdPartyProxy,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryManagedServer => "primary-managed-server",
            Self::ReverseProxyModule => "reverse-proxy-module",
            Self::ReverseProxyModuleExpress => "reverse-proxy-module-express",
            Self::NativeHttpStack => "native-http-stack",
            Self::ThirdPartyProxy => "third-party-proxy",
        }
    }

    /// Whether variants for this server carry a module version and hosting
    /// model.
    ///
    /// Delegates to `capabilities::is_module_hosted`.
    pub fn is_module_hosted(self) -> bool {
        crate::domain::capabilities::is_module_hosted(self)
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary-managed-server" | "primary" | "kestrel" => Ok(Self::PrimaryManagedServer),
            "reverse-proxy-module" | "iis" => Ok(Self::ReverseProxyModule),
            "reverse-proxy-module-express" | "iis-express" | "iisexpress" => {
                Ok(Self::ReverseProxyModuleExpress)
            }
            "native-http-stack" | "http-sys" | "httpsys" => Ok(Self::NativeHttpStack),
            "third-party-proxy" | "nginx" => Ok(Self::ThirdPartyProxy),
            other => Err(invalid("server", other)),
        }
    }
}

// ── FrameworkMoniker ─────────────────────────────────────────────────────────

/// A target framework the application under test is compiled for.
///
/// Monikers are parsed from their short names at configuration time;
/// unknown names are rejected rather than silently treated as modern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameworkMoniker {
    /// The legacy full framework. Windows-only, never portable, no
    /// in-process hosting.
    #[serde(rename = "net461")]
    LegacyFramework,
    #[serde(rename = "netcoreapp2.0")]
    NetCoreApp20,
    #[serde(rename = "netcoreapp2.1")]
    NetCoreApp21,
    #[serde(rename = "netcoreapp2.2")]
    NetCoreApp22,
}

impl FrameworkMoniker {
    pub const ALL: [Self; 4] = [
        Self::LegacyFramework,
        Self::NetCoreApp20,
        Self::NetCoreApp21,
        Self::NetCoreApp22,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LegacyFramework => "net461",
            Self::NetCoreApp20 => "netcoreapp2.0",
            Self::NetCoreApp21 => "netcoreapp2.1",
            Self::NetCoreApp22 => "netcoreapp2.2",
        }
    }

    /// Whether this moniker satisfies `other`.
    pub fn matches(self, other: Self) -> bool {
        self == other
    }

    /// Whether this is the legacy full-framework moniker.
    pub fn is_legacy(self) -> bool {
        self.matches(Self::LegacyFramework)
    }
}

impl fmt::Display for FrameworkMoniker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkMoniker {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "net461" | "legacy" => Ok(Self::LegacyFramework),
            "netcoreapp2.0" => Ok(Self::NetCoreApp20),
            "netcoreapp2.1" => Ok(Self::NetCoreApp21),
            "netcoreapp2.2" => Ok(Self::NetCoreApp22),
            other => Err(invalid("framework", other)),
        }
    }
}

// ── AppDeploymentType ────────────────────────────────────────────────────────

/// How the application under test is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppDeploymentType {
    /// Framework-dependent: runs on a shared runtime install.
    Portable,
    /// Self-contained: ships its own runtime.
    Standalone,
}

impl AppDeploymentType {
    pub const ALL: [Self; 2] = [Self::Portable, Self::Standalone];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Standalone => "standalone",
        }
    }
}

impl fmt::Display for AppDeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppDeploymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" | "framework-dependent" => Ok(Self::Portable),
            "standalone" | "self-contained" => Ok(Self::Standalone),
            other => Err(invalid("app type", other)),
        }
    }
}

// ── Architecture ─────────────────────────────────────────────────────────────

/// CPU architecture the application under test runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86,
    X64,
}

impl Architecture {
    pub const ALL: [Self; 2] = [Self::X64, Self::X86];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X64 => "x64",
        }
    }

    /// Map a raw host CPU name (as reported by `std::env::consts::ARCH` or
    /// similar) to an architecture.
    ///
    /// Anything other than 32/64-bit x86 is a configuration error: the
    /// matrix has no variants for it.
    pub fn from_host(raw: &str) -> Result<Self, DomainError> {
        match raw.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i586" | "i686" => Ok(Self::X86),
            "x86_64" | "amd64" | "x64" => Ok(Self::X64),
            _ => Err(DomainError::UnrecognizedArchitecture {
                architecture: raw.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" => Ok(Self::X86),
            "x64" => Ok(Self::X64),
            other => Err(invalid("architecture", other)),
        }
    }
}

// ── HostingModel ─────────────────────────────────────────────────────────────

/// Where the application runs relative to the module-hosting server.
///
/// Only meaningful for module-hosted servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostingModel {
    OutOfProcess,
    InProcess,
}

impl HostingModel {
    pub const ALL: [Self; 2] = [Self::OutOfProcess, Self::InProcess];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfProcess => "out-of-process",
            Self::InProcess => "in-process",
        }
    }
}

impl fmt::Display for HostingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostingModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "out-of-process" | "outofprocess" | "oop" => Ok(Self::OutOfProcess),
            "in-process" | "inprocess" | "inproc" => Ok(Self::InProcess),
            other => Err(invalid("hosting model", other)),
        }
    }
}

// ── ModuleVersion ────────────────────────────────────────────────────────────

/// Version of the native hosting module.
///
/// Only meaningful for module-hosted servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleVersion {
    V1,
    V2,
}

impl ModuleVersion {
    pub const ALL: [Self; 2] = [Self::V1, Self::V2];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "ancm" | "aspnetcoremodule" => Ok(Self::V1),
            "v2" | "ancm-v2" | "aspnetcoremodulev2" => Ok(Self::V2),
            other => Err(invalid("module version", other)),
        }
    }
}

// ── OsFamily ─────────────────────────────────────────────────────────────────

/// Operating system family of the machine the matrix is built on.
///
/// Compatibility rules only distinguish Windows from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl OsFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Other => "other",
        }
    }

    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Classify a raw OS name as reported by `std::env::consts::OS`.
    ///
    /// Never fails: unknown systems are `Other`, which is non-Windows.
    pub fn from_host(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "macos" | "osx" | "darwin" => Ok(Self::MacOs),
            "other" => Ok(Self::Other),
            other => Err(invalid("os", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_display_is_kebab_case() {
        assert_eq!(ServerKind::PrimaryManagedServer.to_string(), "primary-managed-server");
        assert_eq!(
            ServerKind::ReverseProxyModuleExpress.to_string(),
            "reverse-proxy-module-express"
        );
    }

    #[test]
    fn server_from_str_accepts_aliases() {
        assert_eq!("kestrel".parse::<ServerKind>().unwrap(), ServerKind::PrimaryManagedServer);
        assert_eq!("IIS".parse::<ServerKind>().unwrap(), ServerKind::ReverseProxyModule);
        assert_eq!(
            "iis-express".parse::<ServerKind>().unwrap(),
            ServerKind::ReverseProxyModuleExpress
        );
        assert_eq!("httpsys".parse::<ServerKind>().unwrap(), ServerKind::NativeHttpStack);
        assert_eq!("nginx".parse::<ServerKind>().unwrap(), ServerKind::ThirdPartyProxy);
    }

    #[test]
    fn every_value_round_trips_through_its_display_form() {
        for s in ServerKind::ALL {
            assert_eq!(s.as_str().parse::<ServerKind>().unwrap(), s);
        }
        for f in FrameworkMoniker::ALL {
            assert_eq!(f.as_str().parse::<FrameworkMoniker>().unwrap(), f);
        }
        for h in HostingModel::ALL {
            assert_eq!(h.as_str().parse::<HostingModel>().unwrap(), h);
        }
    }

    #[test]
    fn unknown_framework_is_rejected_not_treated_as_modern() {
        let err = "net5.0".parse::<FrameworkMoniker>().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidDimension {
                dimension: "framework",
                value: "net5.0".into()
            }
        );
    }

    #[test]
    fn only_net461_is_legacy() {
        assert!(FrameworkMoniker::LegacyFramework.is_legacy());
        assert!(!FrameworkMoniker::NetCoreApp20.is_legacy());
        assert!(!FrameworkMoniker::NetCoreApp21.is_legacy());
        assert!(!FrameworkMoniker::NetCoreApp22.is_legacy());
    }

    #[test]
    fn architecture_from_host_maps_known_cpu_names() {
        assert_eq!(Architecture::from_host("x86_64").unwrap(), Architecture::X64);
        assert_eq!(Architecture::from_host("AMD64").unwrap(), Architecture::X64);
        assert_eq!(Architecture::from_host("i686").unwrap(), Architecture::X86);
        assert_eq!(Architecture::from_host("x86").unwrap(), Architecture::X86);
    }

    #[test]
    fn architecture_from_host_rejects_arm() {
        let err = Architecture::from_host("aarch64").unwrap_err();
        assert!(matches!(err, DomainError::UnrecognizedArchitecture { .. }));
    }

    #[test]
    fn hosting_model_and_module_version_aliases() {
        assert_eq!("inproc".parse::<HostingModel>().unwrap(), HostingModel::InProcess);
        assert_eq!("OOP".parse::<HostingModel>().unwrap(), HostingModel::OutOfProcess);
        assert_eq!("ancm-v2".parse::<ModuleVersion>().unwrap(), ModuleVersion::V2);
        assert!("v3".parse::<ModuleVersion>().is_err());
    }

    #[test]
    fn os_family_from_host_defaults_to_other() {
        assert_eq!(OsFamily::from_host("windows"), OsFamily::Windows);
        assert_eq!(OsFamily::from_host("linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_host("macos"), OsFamily::MacOs);
        assert_eq!(OsFamily::from_host("freebsd"), OsFamily::Other);
        assert!(!OsFamily::Other.is_windows());
    }

    #[test]
    fn serde_uses_display_forms() {
        let json = serde_json::to_string(&FrameworkMoniker::NetCoreApp21).unwrap();
        assert_eq!(json, "\"netcoreapp2.1\"");
        let json = serde_json::to_string(&HostingModel::InProcess).unwrap();
        assert_eq!(json, "\"in-process\"");
    }
}
