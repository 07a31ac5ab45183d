//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{Args, builder::FalseyValueParser};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more about the expansion; repeat for more detail.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v summary, -vv defaults and platform, -vvv trace)",
        long_help = "Raise the log level on stderr:
    (none)  - warnings, e.g. an empty matrix
    -v      - variant count per expansion
    -vv     - probed platform and every filled-in default
    -vvv    - everything"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. Machine formats still print.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only (json/csv/list output is unaffected)"
    )]
    pub quiet: bool,

    /// Plain output without ANSI colour.
    ///
    /// Any non-empty `NO_COLOR` other than a falsey value (`0`, `false`,
    /// `no`, `off`) turns colour off, per <https://no-color.org>.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored tables and messages"
    )]
    pub no_color: bool,

    /// Read settings from this TOML file instead of the default locations.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this config file (must exist)"
    )]
    pub config: Option<PathBuf>,
}
