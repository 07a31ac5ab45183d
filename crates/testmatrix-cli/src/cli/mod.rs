//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.
//!
//! Dimension values are parsed straight into the core enums through their
//! `FromStr` impls, so the aliases accepted here are the ones the core
//! documents.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use testmatrix_core::domain::{
    AppDeploymentType, Architecture, FrameworkMoniker, HostingModel, ModuleVersion, OsFamily,
    ServerKind,
};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "testmatrix",
    bin_name = "testmatrix",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Expand test variant matrices",
    long_about = "testmatrix expands servers, frameworks, deployment types, \
                  architectures and module settings into the test variants \
                  that are valid on the current (or a simulated) platform.",
    after_help = "EXAMPLES:\n\
        \x20 testmatrix expand --server kestrel --framework netcoreapp2.1\n\
        \x20 testmatrix expand --server iis --framework netcoreapp2.2 --all-module-versions --all-hosting-models\n\
        \x20 testmatrix expand --server kestrel,nginx --framework netcoreapp2.1 --os linux --cpu x86_64\n\
        \x20 testmatrix completions bash > /usr/share/bash-completion/completions/testmatrix",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Expand a variant matrix.
    #[command(
        visible_alias = "x",
        about = "Expand a variant matrix",
        after_help = "VALUES:\n\
            \x20 servers:         kestrel, iis, iis-express, http-sys, nginx\n\
            \x20 frameworks:      net461, netcoreapp2.0, netcoreapp2.1, netcoreapp2.2\n\
            \x20 app types:       portable, standalone\n\
            \x20 architectures:   x64, x86\n\
            \x20 hosting models:  out-of-process, in-process\n\
            \x20 module versions: v1, v2\n\n\
            EXAMPLES:\n\
            \x20 testmatrix expand -s kestrel -f netcoreapp2.1 --all-archs\n\
            \x20 testmatrix expand -s iis -f net461,netcoreapp2.2 --os windows --format json"
    )]
    Expand(ExpandArgs),

    /// Initialise a testmatrix configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 testmatrix init           # default location\n\
            \x20 testmatrix init --local   # .testmatrix.toml in CWD\n\
            \x20 testmatrix init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 testmatrix completions bash > ~/.local/share/bash-completion/completions/testmatrix\n\
            \x20 testmatrix completions zsh  > ~/.zfunc/_testmatrix\n\
            \x20 testmatrix completions fish > ~/.config/fish/completions/testmatrix.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the testmatrix configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 testmatrix config get defaults.target_framework\n\
            \x20 testmatrix config list\n\
            \x20 testmatrix config path"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Whether the command reads the layered configuration.
    ///
    /// `init`, `completions` and `config path` run on defaults so they still
    /// work when the config file itself is broken.
    pub fn reads_config(&self) -> bool {
        matches!(
            self,
            Commands::Expand(_) | Commands::Config(ConfigCommands::Get { .. } | ConfigCommands::List)
        )
    }
}

// ── expand ────────────────────────────────────────────────────────────────────

/// Arguments for `testmatrix expand`.
#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Servers to test. Without any, the matrix is empty.
    #[arg(
        short = 's',
        long = "server",
        value_name = "SERVER",
        value_delimiter = ',',
        help = "Servers to test (repeat or comma-separate)"
    )]
    pub servers: Vec<ServerKind>,

    /// Frameworks; inferred from the compiled target when omitted.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        value_delimiter = ',',
        help = "Target frameworks (default: inferred from --target-framework)"
    )]
    pub frameworks: Vec<FrameworkMoniker>,

    #[arg(
        short = 't',
        long = "app-type",
        value_name = "TYPE",
        value_delimiter = ',',
        conflicts_with = "all_app_types",
        help = "Deployment types (default: portable)"
    )]
    pub app_types: Vec<AppDeploymentType>,

    #[arg(long = "all-app-types", help = "Use every deployment type")]
    pub all_app_types: bool,

    #[arg(
        short = 'a',
        long = "arch",
        value_name = "ARCH",
        value_delimiter = ',',
        conflicts_with = "all_archs",
        help = "CPU architectures (default: the host's)"
    )]
    pub architectures: Vec<Architecture>,

    #[arg(long = "all-archs", help = "Use every architecture")]
    pub all_archs: bool,

    #[arg(
        long = "hosting-model",
        value_name = "MODEL",
        value_delimiter = ',',
        conflicts_with = "all_hosting_models",
        help = "Hosting models for module-hosted servers (default: out-of-process)"
    )]
    pub hosting_models: Vec<HostingModel>,

    #[arg(long = "all-hosting-models", help = "Use every hosting model")]
    pub all_hosting_models: bool,

    #[arg(
        long = "module-version",
        value_name = "VERSION",
        value_delimiter = ',',
        conflicts_with = "all_module_versions",
        help = "Module versions for module-hosted servers (default: v1)"
    )]
    pub module_versions: Vec<ModuleVersion>,

    #[arg(long = "all-module-versions", help = "Use every module version")]
    pub all_module_versions: bool,

    /// Compiled-target name used for framework inference,
    /// e.g. `.NETCoreApp,Version=v2.1`. Overrides `defaults.target_framework`.
    #[arg(
        long = "target-framework",
        value_name = "NAME",
        help = "Compiled target used to infer the framework"
    )]
    pub target_framework: Option<String>,

    /// Simulate this OS instead of probing the host.
    #[arg(long = "os", value_name = "OS", help = "Simulated OS (windows, linux, macos)")]
    pub os: Option<OsFamily>,

    /// Simulate this raw CPU name instead of probing the host.
    #[arg(long = "cpu", value_name = "CPU", help = "Simulated CPU (e.g. x86_64, i686)")]
    pub cpu: Option<String>,

    #[arg(
        long = "skip-server",
        value_name = "SERVER",
        value_delimiter = ',',
        help = "Drop variants for these servers after expansion"
    )]
    pub skip_servers: Vec<ServerKind>,

    #[arg(
        long = "skip-framework",
        value_name = "FRAMEWORK",
        value_delimiter = ',',
        help = "Drop variants for these frameworks after expansion"
    )]
    pub skip_frameworks: Vec<FrameworkMoniker>,

    /// Output format; defaults to `output.format` from the config.
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<VariantFormat>,
}

/// Output format for expanded variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// One variant per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `testmatrix init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.testmatrix.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `testmatrix completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `testmatrix config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.target_framework`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
