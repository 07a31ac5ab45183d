//! Implementation of the `testmatrix expand` command.
//!
//! Responsibility: translate CLI arguments into a `VariantSpec`, pick the
//! platform probe, call the core matrix service, and render the variants.
//! No expansion rules live here.

use tracing::{debug, instrument, warn};

use testmatrix_adapters::{FixedPlatform, HostPlatform};
use testmatrix_core::{
    application::{MatrixService, PlatformProbe},
    domain::{Variant, VariantList, VariantSpec},
};

use crate::{
    cli::{ExpandArgs, VariantFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const COLUMNS: [&str; 6] = ["SERVER", "FRAMEWORK", "APP TYPE", "ARCH", "MODULE", "HOSTING"];
const CSV_HEADER: &str = "server,framework,app_type,architecture,module_version,hosting_model";

/// Execute the `testmatrix expand` command.
///
/// 1. Build a `VariantSpec` from the dimension flags
/// 2. Probe the host, or simulate one with `--os` / `--cpu`
/// 3. Expand, then drop `--skip-*` matches
/// 4. Render in the requested format
#[instrument(skip_all, fields(servers = args.servers.len()))]
pub fn execute(args: ExpandArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let spec = build_spec(&args);
    let platform = build_platform(&args, &config)?;
    let format = args.format.unwrap_or(config.output.format);
    debug!(?format, "Expanding matrix");

    let variants = MatrixService::new(platform).expand(&spec)?;
    let variants = apply_skips(variants, &args);

    if variants.is_empty() {
        return report_empty(format, &output);
    }

    match format {
        VariantFormat::Table => {
            output.table(&table_rows(&variants))?;
            output.print("")?;
            output.info(&format!("{} variant(s)", variants.len()))?;
        }
        // Machine formats bypass OutputManager so they survive --quiet.
        VariantFormat::List => print!("{}", render_list(&variants)),
        VariantFormat::Json => println!("{}", render_json(&variants)?),
        VariantFormat::Csv => print!("{}", render_csv(&variants)),
    }

    Ok(())
}

// ── Spec and platform ─────────────────────────────────────────────────────────

fn build_spec(args: &ExpandArgs) -> VariantSpec {
    let mut spec = VariantSpec::for_servers(args.servers.iter().copied())
        .with_frameworks(args.frameworks.iter().copied())
        .with_app_types(args.app_types.iter().copied())
        .with_architectures(args.architectures.iter().copied())
        .with_hosting_models(args.hosting_models.iter().copied())
        .with_module_versions(args.module_versions.iter().copied());

    if args.all_app_types {
        spec = spec.with_all_app_types();
    }
    if args.all_archs {
        spec = spec.with_all_architectures();
    }
    if args.all_hosting_models {
        spec = spec.with_all_hosting_models();
    }
    if args.all_module_versions {
        spec = spec.with_all_module_versions();
    }
    spec
}

/// The host probe, or a fixed one when either `--os` or `--cpu` is given.
///
/// A missing half of the override is taken from the host.
fn build_platform(args: &ExpandArgs, config: &AppConfig) -> CliResult<Box<dyn PlatformProbe>> {
    let target = args
        .target_framework
        .clone()
        .or_else(|| config.defaults.target_framework.clone());

    if args.os.is_none() && args.cpu.is_none() {
        let host = HostPlatform::new();
        return Ok(Box::new(match target {
            Some(name) => host.with_target_framework(name),
            None => host,
        }));
    }

    let os = args.os.unwrap_or_else(HostPlatform::os);
    let cpu = args.cpu.clone().unwrap_or_else(HostPlatform::cpu);
    let fixed = FixedPlatform::from_names(os.as_str(), &cpu)?;
    debug!(environment = %fixed.environment(), "Simulating platform");

    Ok(Box::new(match target {
        Some(name) => fixed.with_target_framework(name),
        None => fixed,
    }))
}

fn apply_skips(variants: VariantList, args: &ExpandArgs) -> VariantList {
    let mut variants = variants;
    if !args.skip_servers.is_empty() {
        variants = variants.skip(|v| args.skip_servers.contains(&v.server()));
    }
    if !args.skip_frameworks.is_empty() {
        variants = variants.skip(|v| args.skip_frameworks.contains(&v.framework()));
    }
    variants
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn report_empty(format: VariantFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        VariantFormat::Table => {
            output.warning("No variants: nothing requested is supported on this platform")?;
        }
        VariantFormat::List => warn!("No variants"),
        VariantFormat::Json => {
            warn!("No variants");
            println!("[]");
        }
        VariantFormat::Csv => {
            warn!("No variants");
            println!("{CSV_HEADER}");
        }
    }
    Ok(())
}

fn cells(variant: &Variant) -> [String; 6] {
    [
        variant.server().to_string(),
        variant.framework().to_string(),
        variant.app_type().to_string(),
        variant.architecture().to_string(),
        variant
            .module_version()
            .map(|v| v.to_string())
            .unwrap_or_default(),
        variant
            .hosting_model()
            .map(|h| h.to_string())
            .unwrap_or_default(),
    ]
}

fn table_rows(variants: &VariantList) -> Vec<Vec<String>> {
    let has_module = variants.iter().any(|v| v.module().is_some());
    let width = if has_module { 6 } else { 4 };

    std::iter::once(COLUMNS.map(str::to_owned))
        .chain(variants.iter().map(cells))
        .map(|row| row.into_iter().take(width).collect::<Vec<_>>())
        .collect()
}

fn render_list(variants: &VariantList) -> String {
    variants.cases().map(|case| format!("{case}\n")).collect()
}

fn render_json(variants: &VariantList) -> CliResult<String> {
    serde_json::to_string_pretty(variants).map_err(|e| CliError::IoError {
        message: format!("Failed to serialise variants: {e}"),
        source: e.into(),
    })
}

fn render_csv(variants: &VariantList) -> String {
    let mut out = format!("{CSV_HEADER}\n");
    for variant in variants {
        out.push_str(&cells(variant).join(","));
        out.push('\n');
    }
    out
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testmatrix_core::domain::{Environment, OsFamily};

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse(extra: &[&str]) -> ExpandArgs {
        let argv = ["testmatrix", "expand"].into_iter().chain(extra.iter().copied());
        match Cli::parse_from(argv).command {
            Commands::Expand(args) => args,
            other => panic!("expected Expand, got {other:?}"),
        }
    }

    fn windows_x64() -> Environment {
        Environment::new(OsFamily::Windows, "x86_64")
    }

    #[test]
    fn all_flags_widen_the_spec() {
        let spec = build_spec(&parse(&["-s", "iis", "--all-archs", "--all-module-versions"]));
        assert_eq!(spec.architectures().len(), 2);
        assert_eq!(spec.module_versions().len(), 2);
        assert!(spec.hosting_models().is_empty());
    }

    #[test]
    fn skips_are_applied_after_expansion() {
        let args = parse(&[
            "-s",
            "kestrel,http-sys",
            "-f",
            "netcoreapp2.1,netcoreapp2.2",
            "--skip-server",
            "http-sys",
            "--skip-framework",
            "netcoreapp2.1",
        ]);
        let full = build_spec(&args).build(&windows_x64()).unwrap();
        assert_eq!(full.len(), 4);

        let kept = apply_skips(full, &args);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept.get(0).unwrap().to_string(),
            "primary-managed-server | netcoreapp2.2 | portable | x64"
        );
    }

    #[test]
    fn table_drops_module_columns_when_unused() {
        let list = build_spec(&parse(&["-s", "kestrel", "-f", "netcoreapp2.0"]))
            .build(&windows_x64())
            .unwrap();
        let rows = table_rows(&list);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["SERVER", "FRAMEWORK", "APP TYPE", "ARCH"]);
    }

    #[test]
    fn csv_leaves_module_fields_blank_for_plain_servers() {
        let list = build_spec(&parse(&["-s", "kestrel,iis", "-f", "netcoreapp2.2"]))
            .build(&windows_x64())
            .unwrap();
        let csv = render_csv(&list);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "primary-managed-server,netcoreapp2.2,portable,x64,,");
        assert_eq!(
            lines[2],
            "reverse-proxy-module,netcoreapp2.2,portable,x64,v1,out-of-process"
        );
    }

    #[test]
    fn json_is_an_array_of_variants() {
        let list = build_spec(&parse(&["-s", "iis-express", "-f", "netcoreapp2.1"]))
            .build(&windows_x64())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&list).unwrap()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["server"], "reverse-proxy-module-express");
        assert_eq!(json[0]["hosting_model"], "out-of-process");
    }

    #[test]
    fn simulated_platform_fills_missing_half_from_host() {
        let args = parse(&["-s", "kestrel", "--os", "linux"]);
        let probe = build_platform(&args, &AppConfig::default()).unwrap();
        let env = probe.probe().unwrap();
        assert_eq!(env.os(), OsFamily::Linux);
        assert_eq!(env.cpu(), HostPlatform::cpu());
    }

    #[test]
    fn simulated_cpu_keeps_host_os() {
        let args = parse(&["-s", "kestrel", "--cpu", "i686"]);
        let env = build_platform(&args, &AppConfig::default())
            .unwrap()
            .probe()
            .unwrap();
        assert_eq!(env.os(), HostPlatform::os());
        assert_eq!(env.cpu(), "i686");
    }

    #[test]
    fn target_framework_flag_beats_config() {
        let mut config = AppConfig::default();
        config.defaults.target_framework = Some(".NETCoreApp,Version=v2.0".into());
        let args = parse(&[
            "-s",
            "kestrel",
            "--os",
            "linux",
            "--target-framework",
            ".NETCoreApp,Version=v2.2",
        ]);
        let env = build_platform(&args, &config).unwrap().probe().unwrap();
        assert_eq!(env.target_framework(), Some(".NETCoreApp,Version=v2.2"));
    }
}
