//! A single fully-resolved test configuration.

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::{
    AppDeploymentType, Architecture, FrameworkMoniker, HostingModel, ModuleVersion, ServerKind,
};

/// Module settings carried only by module-hosted variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleHosting {
    pub module_version: ModuleVersion,
    pub hosting_model: HostingModel,
}

/// One cell of the expanded matrix.
///
/// Variants are only produced by [`VariantSpec::build`](super::VariantSpec::build),
/// which guarantees `module` is `Some` exactly when the server is
/// module-hosted and that no compatibility rule is violated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Variant {
    server: ServerKind,
    framework: FrameworkMoniker,
    app_type: AppDeploymentType,
    architecture: Architecture,
    #[serde(flatten)]
    module: Option<ModuleHosting>,
}

impl Variant {
    pub(crate) const fn new(
        server: ServerKind,
        framework: FrameworkMoniker,
        app_type: AppDeploymentType,
        architecture: Architecture,
    ) -> Self {
        Self {
            server,
            framework,
            app_type,
            architecture,
            module: None,
        }
    }

    pub(crate) const fn with_module(
        mut self,
        module_version: ModuleVersion,
        hosting_model: HostingModel,
    ) -> Self {
        self.module = Some(ModuleHosting {
            module_version,
            hosting_model,
        });
        self
    }

    pub const fn server(&self) -> ServerKind {
        self.server
    }
    pub const fn framework(&self) -> FrameworkMoniker {
        self.framework
    }
    pub const fn app_type(&self) -> AppDeploymentType {
        self.app_type
    }
    pub const fn architecture(&self) -> Architecture {
        self.architecture
    }
    pub const fn module(&self) -> Option<ModuleHosting> {
        self.module
    }

    /// `None` unless the server is module-hosted.
    pub fn module_version(&self) -> Option<ModuleVersion> {
        self.module.map(|m| m.module_version)
    }

    /// `None` unless the server is module-hosted.
    pub fn hosting_model(&self) -> Option<HostingModel> {
        self.module.map(|m| m.hosting_model)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.server, self.framework, self.app_type, self.architecture
        )?;
        if let Some(module) = self.module {
            write!(f, " | {} | {}", module.module_version, module.hosting_model)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> Variant {
        Variant::new(
            ServerKind::PrimaryManagedServer,
            FrameworkMoniker::NetCoreApp21,
            AppDeploymentType::Portable,
            Architecture::X64,
        )
    }

    #[test]
    fn plain_variant_has_no_module_fields() {
        let v = primary();
        assert_eq!(v.module_version(), None);
        assert_eq!(v.hosting_model(), None);
        assert_eq!(
            v.to_string(),
            "primary-managed-server | netcoreapp2.1 | portable | x64"
        );
    }

    #[test]
    fn module_variant_renders_module_fields() {
        let v = Variant::new(
            ServerKind::ReverseProxyModule,
            FrameworkMoniker::NetCoreApp22,
            AppDeploymentType::Standalone,
            Architecture::X86,
        )
        .with_module(ModuleVersion::V2, HostingModel::InProcess);

        assert_eq!(v.module_version(), Some(ModuleVersion::V2));
        assert_eq!(v.hosting_model(), Some(HostingModel::InProcess));
        assert_eq!(
            v.to_string(),
            "reverse-proxy-module | netcoreapp2.2 | standalone | x86 | v2 | in-process"
        );
    }

    #[test]
    fn json_omits_module_fields_when_not_applicable() {
        let json = serde_json::to_value(primary()).unwrap();
        assert_eq!(json["server"], "primary-managed-server");
        assert_eq!(json["framework"], "netcoreapp2.1");
        assert!(json.get("module_version").is_none());
        assert!(json.get("hosting_model").is_none());
    }

    #[test]
    fn json_flattens_module_fields() {
        let v = Variant::new(
            ServerKind::ReverseProxyModuleExpress,
            FrameworkMoniker::NetCoreApp21,
            AppDeploymentType::Portable,
            Architecture::X64,
        )
        .with_module(ModuleVersion::V1, HostingModel::OutOfProcess);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["module_version"], "v1");
        assert_eq!(json["hosting_model"], "out-of-process");
    }
}
