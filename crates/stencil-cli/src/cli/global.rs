//! Flags shared by every `stencil` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Show what each generator renames, writes and skips.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show generator progress (-v), file decisions (-vv), everything (-vvv)"
    )]
    pub verbose: u8,

    /// Only report failures. JSON output is still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print nothing but errors"
    )]
    pub quiet: bool,

    /// Plain summary and error lines. `NO_COLOR` sets this too.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Extra settings file, layered over `stencil.toml` in the project root.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Settings file (must exist)"
    )]
    pub config: Option<PathBuf>,

    /// Directory holding the MCP server's `package.json` and `src/`.
    #[arg(
        short = 'C',
        long = "root",
        global = true,
        value_name = "DIR",
        default_value = ".",
        help = "MCP server project root"
    )]
    pub root: PathBuf,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How the run summary is printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of the run summary on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored when stdout is a terminal.
    #[default]
    Auto,
    /// Colored unless `--no-color` is given.
    Human,
    /// Never colored.
    Plain,
    /// The `ScaffoldReport` as JSON.
    Json,
}
