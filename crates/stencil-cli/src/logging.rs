//! Diagnostics for a generator run.
//!
//! Generators describe what they touch through `tracing` events. This module
//! decides which of those reach stderr. Questions, menus and the final
//! summary are written by the prompt and [`crate::output`] and never pass
//! through here.
//!
//! `-q` shows errors only, the default adds warnings (skipped renames,
//! missing anchors), and each `-v` goes one level deeper. `RUST_LOG` replaces
//! the whole filter when set.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown. Dependencies stay silent unless
/// `RUST_LOG` asks for them.
const STENCIL_TARGETS: [&str; 3] = ["stencil", "stencil_core", "stencil_adapters"];

/// Install the stderr subscriber. Call once, before the first generator runs.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives(verbosity(args)))
            .context("Invalid log filter")?,
    };

    let events = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(args.verbose >= 2)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(events)
        .try_init()
        .context("Failed to initialise tracing")
}

fn verbosity(args: &GlobalArgs) -> LevelFilter {
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

fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    STENCIL_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            root: ".".into(),
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn each_verbose_flag_goes_one_level_deeper() {
        let expected = [
            (0, LevelFilter::WARN),
            (1, LevelFilter::INFO),
            (2, LevelFilter::DEBUG),
            (3, LevelFilter::TRACE),
            (9, LevelFilter::TRACE),
        ];
        for (count, level) in expected {
            assert_eq!(verbosity(&args(count, false)), level, "-v x{count}");
        }
    }

    #[test]
    fn quiet_shows_errors_only() {
        assert_eq!(verbosity(&args(0, true)), LevelFilter::ERROR);
        assert_eq!(verbosity(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn filter_names_every_stencil_crate() {
        assert_eq!(
            directives(LevelFilter::INFO),
            "stencil=info,stencil_core=info,stencil_adapters=info"
        );
        assert!(EnvFilter::try_new(directives(LevelFilter::WARN)).is_ok());
    }
}
