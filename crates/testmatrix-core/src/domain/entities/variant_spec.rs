//! The `VariantSpec` builder and the matrix expansion.
//!
//! A `VariantSpec` lists, per dimension, the values the caller wants to
//! test. [`VariantSpec::build`] fills defaults for the dimensions left
//! empty and expands the spec into the cross product of every combination
//! that is valid on the given [`Environment`].
//!
//! # Expansion order
//!
//! Server → Framework → AppType → Architecture, and for module-hosted
//! servers additionally ModuleVersion → HostingModel. Output order follows
//! this nesting and the order values were given in, so the same spec on the
//! same environment always yields the same list.
//!
//! # Value semantics
//!
//! Every setter consumes the spec and returns it. `build` takes `&self` and
//! fills defaults into locals, so building never changes the spec and two
//! builds of one spec cannot influence each other.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use crate::domain::{
    capabilities,
    entities::{environment::Environment, variant::Variant, variant_list::VariantList},
    error::DomainError,
    value_objects::{
        AppDeploymentType, Architecture, FrameworkMoniker, HostingModel, ModuleVersion, ServerKind,
    },
};

/// Requested values for each matrix dimension.
///
/// Empty dimensions are defaulted at build time:
/// - servers: none → empty result
/// - frameworks: inferred from the environment's compiled target
/// - app types: `[Portable]`
/// - architectures: the host CPU
/// - module versions / hosting models: `[V1]` / `[OutOfProcess]`, only for
///   module-hosted servers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSpec {
    servers: Vec<ServerKind>,
    frameworks: Vec<FrameworkMoniker>,
    app_types: Vec<AppDeploymentType>,
    architectures: Vec<Architecture>,
    hosting_models: Vec<HostingModel>,
    module_versions: Vec<ModuleVersion>,
}

/// Collect `values`, keeping the first occurrence of each.
fn unique<T: PartialEq + Copy>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

impl VariantSpec {
    /// An empty spec. Building it yields an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a spec for the given servers.
    pub fn for_servers(servers: impl IntoIterator<Item = ServerKind>) -> Self {
        Self::new().with_servers(servers)
    }

    pub fn with_servers(mut self, servers: impl IntoIterator<Item = ServerKind>) -> Self {
        self.servers = unique(servers);
        self
    }

    pub fn with_frameworks(mut self, frameworks: impl IntoIterator<Item = FrameworkMoniker>) -> Self {
        self.frameworks = unique(frameworks);
        self
    }

    /// Set frameworks from their short names (`net461`, `netcoreapp2.1`, ...).
    ///
    /// Unknown names are rejected here rather than at build time.
    pub fn with_framework_names<I, S>(self, names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let frameworks = names
            .into_iter()
            .map(|name| name.as_ref().parse::<FrameworkMoniker>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_frameworks(frameworks))
    }

    pub fn with_app_types(mut self, types: impl IntoIterator<Item = AppDeploymentType>) -> Self {
        self.app_types = unique(types);
        self
    }

    pub fn with_all_app_types(self) -> Self {
        self.with_app_types(AppDeploymentType::ALL)
    }

    pub fn with_architectures(mut self, archs: impl IntoIterator<Item = Architecture>) -> Self {
        self.architectures = unique(archs);
        self
    }

    pub fn with_all_architectures(self) -> Self {
        self.with_architectures(Architecture::ALL)
    }

    pub fn with_hosting_models(mut self, models: impl IntoIterator<Item = HostingModel>) -> Self {
        self.hosting_models = unique(models);
        self
    }

    pub fn with_all_hosting_models(self) -> Self {
        self.with_hosting_models(HostingModel::ALL)
    }

    pub fn with_module_versions(mut self, versions: impl IntoIterator<Item = ModuleVersion>) -> Self {
        self.module_versions = unique(versions);
        self
    }

    pub fn with_all_module_versions(self) -> Self {
        self.with_module_versions(ModuleVersion::ALL)
    }

    /// Module V2 hosted in-process only.
    pub fn with_module_v2_in_process(self) -> Self {
        self.with_module_versions([ModuleVersion::V2])
            .with_hosting_models([HostingModel::InProcess])
    }

    pub fn servers(&self) -> &[ServerKind] {
        &self.servers
    }
    pub fn frameworks(&self) -> &[FrameworkMoniker] {
        &self.frameworks
    }
    pub fn app_types(&self) -> &[AppDeploymentType] {
        &self.app_types
    }
    pub fn architectures(&self) -> &[Architecture] {
        &self.architectures
    }
    pub fn hosting_models(&self) -> &[HostingModel] {
        &self.hosting_models
    }
    pub fn module_versions(&self) -> &[ModuleVersion] {
        &self.module_versions
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    /// Requested frameworks, or the one inferred from the compiled target.
    pub fn resolve_frameworks(&self, env: &Environment) -> Result<Vec<FrameworkMoniker>, DomainError> {
        if !self.frameworks.is_empty() {
            return Ok(self.frameworks.clone());
        }
        env.target_framework()
            .and_then(capabilities::infer_framework)
            .map(|moniker| vec![moniker])
            .ok_or_else(|| DomainError::FrameworkNotInferred {
                target_framework: env.target_framework().map(str::to_owned),
            })
    }

    /// Requested architectures, or the host's.
    pub fn resolve_architectures(&self, env: &Environment) -> Result<Vec<Architecture>, DomainError> {
        if !self.architectures.is_empty() {
            return Ok(self.architectures.clone());
        }
        Ok(vec![env.architecture()?])
    }

    /// Requested app types, or `[Portable]`.
    pub fn resolve_app_types(&self) -> Vec<AppDeploymentType> {
        if self.app_types.is_empty() {
            vec![capabilities::DEFAULT_APP_TYPE]
        } else {
            self.app_types.clone()
        }
    }

    // ── Expansion ─────────────────────────────────────────────────────────────

    /// Expand the spec into every valid variant for `env`.
    ///
    /// Returns an empty list when no server was requested. Fails without
    /// producing anything when a needed default cannot be inferred or a
    /// server cannot be classified. Combinations that are merely unsupported
    /// on `env` are skipped silently.
    pub fn build(&self, env: &Environment) -> Result<VariantList, DomainError> {
        let mut list = VariantList::new();
        if self.servers.is_empty() {
            return Ok(list);
        }

        let frameworks = self.resolve_frameworks(env)?;
        let architectures = self.resolve_architectures(env)?;
        let app_types = self.resolve_app_types();

        for &server in &self.servers {
            if !capabilities::server_supported_on(server, env.os())? {
                continue;
            }

            for &framework in &frameworks {
                if !capabilities::framework_supported_on(framework, env.os()) {
                    continue;
                }

                for &requested in &app_types {
                    let Some(app_type) =
                        capabilities::resolve_app_type(framework, requested, app_types.len())
                    else {
                        continue;
                    };

                    for &architecture in &architectures {
                        let variant = Variant::new(server, framework, app_type, architecture);
                        if server.is_module_hosted() {
                            self.expand_module(&mut list, variant);
                        } else {
                            list.add(variant);
                        }
                    }
                }
            }
        }

        Ok(list)
    }

    /// Inner ModuleVersion × HostingModel expansion for module-hosted servers.
    fn expand_module(&self, list: &mut VariantList, base: Variant) {
        let versions = if self.module_versions.is_empty() {
            vec![capabilities::DEFAULT_MODULE_VERSION]
        } else {
            self.module_versions.clone()
        };
        let models = if self.hosting_models.is_empty() {
            vec![capabilities::DEFAULT_HOSTING_MODEL]
        } else {
            self.hosting_models.clone()
        };

        for &version in &versions {
            for &model in &models {
                if capabilities::module_combination_allowed(base.framework(), version, model) {
                    list.add(base.clone().with_module(version, model));
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
