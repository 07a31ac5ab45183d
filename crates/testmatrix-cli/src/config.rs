//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`TESTMATRIX_DEFAULTS__TARGET_FRAMEWORK`, ...)
//! 3. `--config FILE`, or else `.testmatrix.toml` over the user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::VariantFormat;

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".testmatrix.toml";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "TESTMATRIX";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for `expand`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Compiled-target name used for framework inference when no
    /// `--framework` or `--target-framework` is given.
    pub target_framework: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: VariantFormat,
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it, the user config file and `.testmatrix.toml` in
    /// the current directory are both optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading explicit config file");
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                let global = Self::config_path();
                debug!(path = %global.display(), "Looking for user config file");
                builder = builder
                    .add_source(File::from(global).format(FileFormat::Toml).required(false))
                    .add_source(
                        File::from(Path::new(LOCAL_CONFIG_FILE))
                            .format(FileFormat::Toml)
                            .required(false),
                    );
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.testmatrix.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "testmatrix", "testmatrix")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Render as TOML, the format `init` writes.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
