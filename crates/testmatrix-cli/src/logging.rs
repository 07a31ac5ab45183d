//! Diagnostics on stderr.
//!
//! Stdout carries the variants, so every event goes to stderr. Events come
//! from the matrix service (filled-in defaults, variant counts), the host
//! adapter (probed OS and CPU) and this crate. All three share one level:
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | `--quiet` | ERROR |
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//!
//! A set `RUST_LOG` replaces the table entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Targets that get the level picked by `-q`/`-v`.
const TARGETS: [&str; 3] = ["testmatrix", "testmatrix_core", "testmatrix_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(target_directives(level_for(args))),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn target_directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
        }
    }

    #[test]
    fn warnings_by_default() {
        // An empty matrix is reported at WARN and must show without flags.
        assert_eq!(level_for(&flags(0, false)), LevelFilter::WARN);
    }

    #[test]
    fn each_v_raises_one_level() {
        assert_eq!(level_for(&flags(1, false)), LevelFilter::INFO);
        assert_eq!(level_for(&flags(2, false)), LevelFilter::DEBUG);
        assert_eq!(level_for(&flags(3, false)), LevelFilter::TRACE);
        assert_eq!(level_for(&flags(7, false)), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_keeps_errors_only() {
        assert_eq!(level_for(&flags(0, true)), LevelFilter::ERROR);
        assert_eq!(level_for(&flags(2, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_name_all_workspace_crates() {
        let directives = target_directives(LevelFilter::DEBUG).to_lowercase();
        for target in TARGETS {
            assert!(directives.contains(&format!("{target}=debug")), "{directives}");
        }
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
