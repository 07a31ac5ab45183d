//! Server and framework capability registry.
//!
//! Every compatibility rule the matrix applies lives in this module. Each
//! server and each framework moniker is described exactly once by a
//! [`ServerDef`] / [`FrameworkDef`]; the predicates below are table lookups
//! over those entries, so the expansion code in `variant_spec.rs` never
//! matches on dimension values itself.
//!
//! # Adding a New Server
//!
//! 1. Add a variant to `ServerKind` in `value_objects.rs`
//! 2. Add one [`ServerDef`] entry to [`SERVER_REGISTRY`]
//!
//! # Adding a New Framework
//!
//! 1. Add a variant to `FrameworkMoniker` in `value_objects.rs`
//! 2. Add one [`FrameworkDef`] entry to [`FRAMEWORK_REGISTRY`]

use crate::domain::error::DomainError;
use crate::domain::value_objects::{
    AppDeploymentType, FrameworkMoniker, HostingModel, ModuleVersion, OsFamily, ServerKind,
};

/// Module version used when a module-hosted server is expanded without any.
pub const DEFAULT_MODULE_VERSION: ModuleVersion = ModuleVersion::V1;

/// Hosting model used when a module-hosted server is expanded without any.
pub const DEFAULT_HOSTING_MODEL: HostingModel = HostingModel::OutOfProcess;

/// Deployment type used when the caller requests none.
pub const DEFAULT_APP_TYPE: AppDeploymentType = AppDeploymentType::Portable;

// ── Server definitions ───────────────────────────────────────────────────────

/// Which operating systems a server can be tested on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsRequirement {
    Any,
    WindowsOnly,
    NonWindowsOnly,
}

impl OsRequirement {
    pub const fn allows(self, os: OsFamily) -> bool {
        match self {
            Self::Any => true,
            Self::WindowsOnly => os.is_windows(),
            Self::NonWindowsOnly => !os.is_windows(),
        }
    }
}

/// Describes what the matrix needs to know about one server.
#[derive(Debug, Clone, Copy)]
pub struct ServerDef {
    /// The server this entry describes.
    pub server: ServerKind,

    /// Operating systems the server is tested on.
    pub os: OsRequirement,

    /// Whether the server hosts applications through the native module,
    /// which adds the module-version and hosting-model dimensions.
    pub module_hosted: bool,
}

/// Single source of truth for server capabilities.
pub static SERVER_REGISTRY: &[ServerDef] = &[
    ServerDef {
        server: ServerKind::PrimaryManagedServer,
        os: OsRequirement::Any,
        module_hosted: false,
    },
    ServerDef {
        server: ServerKind::ReverseProxyModule,
        os: OsRequirement::WindowsOnly,
        module_hosted: true,
    },
    ServerDef {
        server: ServerKind::ReverseProxyModuleExpress,
        os: OsRequirement::WindowsOnly,
        module_hosted: true,
    },
    ServerDef {
        server: ServerKind::NativeHttpStack,
        os: OsRequirement::WindowsOnly,
        module_hosted: false,
    },
    ServerDef {
        server: ServerKind::ThirdPartyProxy,
        // Runs on Windows too, but is only tested elsewhere.
        os: OsRequirement::NonWindowsOnly,
        module_hosted: false,
    },
];

// ── Framework definitions ────────────────────────────────────────────────────

/// Describes everything the matrix needs to know about one framework moniker.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkDef {
    /// The moniker this entry describes.
    pub moniker: FrameworkMoniker,

    /// Compiled-target name this moniker is inferred from when the caller
    /// names no framework.
    pub target_framework_name: &'static str,

    /// Whether the framework only exists on Windows.
    pub windows_only: bool,

    /// Whether a framework-dependent (portable) deployment exists.
    pub supports_portable: bool,

    /// Whether apps on this framework can be hosted in-process.
    pub supports_in_process: bool,
}

/// Single source of truth for framework capabilities.
pub static FRAMEWORK_REGISTRY: &[FrameworkDef] = &[
    FrameworkDef {
        moniker: FrameworkMoniker::LegacyFramework,
        target_framework_name: ".NETFramework,Version=v4.6.1",
        windows_only: true,
        supports_portable: false,
        supports_in_process: false,
    },
    FrameworkDef {
        moniker: FrameworkMoniker::NetCoreApp20,
        target_framework_name: ".NETCoreApp,Version=v2.0",
        windows_only: false,
        supports_portable: true,
        supports_in_process: true,
    },
    FrameworkDef {
        moniker: FrameworkMoniker::NetCoreApp21,
        target_framework_name: ".NETCoreApp,Version=v2.1",
        windows_only: false,
        supports_portable: true,
        supports_in_process: true,
    },
    FrameworkDef {
        moniker: FrameworkMoniker::NetCoreApp22,
        target_framework_name: ".NETCoreApp,Version=v2.2",
        windows_only: false,
        supports_portable: true,
        supports_in_process: true,
    },
];

// ── Registry lookup API ───────────────────────────────────────────────────────
//
// These functions are the ONLY entry points for compatibility queries.
// Do not write `match` arms on servers or frameworks elsewhere.

/// Find the capability definition for a server.
///
/// Returns `None` only if the server is not registered, which is a programming
/// error, not a user error. The `assert_registry_integrity` test catches it.
pub fn find_server(server: ServerKind) -> Option<&'static ServerDef> {
    SERVER_REGISTRY.iter().find(|def| def.server == server)
}

/// Find the capability definition for a framework moniker.
pub fn find_framework(moniker: FrameworkMoniker) -> Option<&'static FrameworkDef> {
    FRAMEWORK_REGISTRY.iter().find(|def| def.moniker == moniker)
}

/// Whether `server` gets the module-version × hosting-model expansion.
pub fn is_module_hosted(server: ServerKind) -> bool {
    find_server(server).is_some_and(|def| def.module_hosted)
}

/// Whether `server` can be tested on `os`.
///
/// An unregistered server is a configuration error rather than a silent
/// skip: the caller referenced a value the matrix cannot classify.
pub fn server_supported_on(server: ServerKind, os: OsFamily) -> Result<bool, DomainError> {
    find_server(server)
        .map(|def| def.os.allows(os))
        .ok_or_else(|| DomainError::UnclassifiedServer {
            server: server.to_string(),
        })
}

/// Whether `moniker` can be tested on `os`.
pub fn framework_supported_on(moniker: FrameworkMoniker, os: OsFamily) -> bool {
    find_framework(moniker).is_some_and(|def| !def.windows_only || os.is_windows())
}

/// Resolve the deployment type actually used for `(moniker, requested)`.
///
/// A framework without portable deployments cannot pair with `Portable`.
/// When `Portable` is the only type the caller asked for, it is downgraded
/// to `Standalone` so the framework still gets a variant; when other types
/// were requested too, the `Portable` entry is dropped (`None`).
pub fn resolve_app_type(
    moniker: FrameworkMoniker,
    requested: AppDeploymentType,
    requested_count: usize,
) -> Option<AppDeploymentType> {
    let supports_portable = find_framework(moniker).is_some_and(|def| def.supports_portable);
    match requested {
        AppDeploymentType::Portable if !supports_portable => {
            (requested_count == 1).then_some(AppDeploymentType::Standalone)
        }
        other => Some(other),
    }
}

/// Whether a module-hosted variant with this combination is valid.
///
/// In-process hosting needs a framework that supports it and module V2;
/// out-of-process hosting works under either module version.
pub fn module_combination_allowed(
    moniker: FrameworkMoniker,
    version: ModuleVersion,
    hosting: HostingModel,
) -> bool {
    match hosting {
        HostingModel::OutOfProcess => true,
        HostingModel::InProcess => {
            let in_process = find_framework(moniker).is_some_and(|def| def.supports_in_process);
            in_process && version == ModuleVersion::V2
        }
    }
}

/// Infer the framework moniker from a compiled-target name such as
/// `.NETCoreApp,Version=v2.1`.
///
/// Returns `None` for unknown or empty names.
pub fn infer_framework(target_framework_name: &str) -> Option<FrameworkMoniker> {
    let name = target_framework_name.trim();
    if name.is_empty() {
        return None;
    }
    FRAMEWORK_REGISTRY
        .iter()
        .find(|def| def.target_framework_name.eq_ignore_ascii_case(name))
        .map(|def| def.moniker)
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for server in ServerKind::ALL {
        let count = SERVER_REGISTRY.iter().filter(|d| d.server == server).count();
        assert_eq!(count, 1, "Server {server:?} registered {count} times");
    }

    for moniker in FrameworkMoniker::ALL {
        let count = FRAMEWORK_REGISTRY
            .iter()
            .filter(|d| d.moniker == moniker)
            .count();
        assert_eq!(count, 1, "Framework {moniker:?} registered {count} times");
    }

    for def in FRAMEWORK_REGISTRY {
        // Only the legacy moniker carries restrictions.
        let restricted = def.windows_only || !def.supports_portable || !def.supports_in_process;
        assert_eq!(
            restricted,
            def.moniker.is_legacy(),
            "Framework {:?}: restrictions do not match is_legacy()",
            def.moniker
        );

        let others = FRAMEWORK_REGISTRY
            .iter()
            .filter(|d| d.target_framework_name == def.target_framework_name)
            .count();
        assert_eq!(
            others, 1,
            "Target name {} maps to several monikers",
            def.target_framework_name
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
