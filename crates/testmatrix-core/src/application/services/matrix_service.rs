//! Matrix Service - expands a spec against the probed platform.
//!
//! 1. Probe the platform once
//! 2. Expand the `VariantSpec` with the domain rules
//! 3. Report what was filled in and what came out

use tracing::{debug, info, instrument};

use crate::{
    application::ports::PlatformProbe,
    domain::{VariantList, VariantSpec},
    error::MatrixResult,
};

/// Main expansion service.
pub struct MatrixService {
    platform: Box<dyn PlatformProbe>,
}

impl MatrixService {
    /// Create a new service reading the environment from `platform`.
    pub fn new(platform: Box<dyn PlatformProbe>) -> Self {
        Self { platform }
    }

    /// Expand `spec` into the variants valid on the probed platform.
    #[instrument(skip_all, fields(servers = spec.servers().len()))]
    pub fn expand(&self, spec: &VariantSpec) -> MatrixResult<VariantList> {
        let env = self.platform.probe()?;
        debug!(environment = %env, "Platform probed");

        if spec.servers().is_empty() {
            // Not an error here; the consumer reports the empty matrix.
            debug!("No servers requested, matrix is empty");
        }
        if spec.frameworks().is_empty() {
            debug!(target_framework = ?env.target_framework(), "Inferring framework");
        }
        if spec.architectures().is_empty() {
            debug!(cpu = env.cpu(), "Inferring architecture from host");
        }

        let variants = spec.build(&env)?;
        info!(variants = variants.len(), environment = %env, "Matrix expanded");
        Ok(variants)
    }
}
