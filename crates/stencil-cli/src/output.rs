//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use stencil_core::application::ScaffoldReport;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Print the summary of a generator run.
    ///
    /// JSON is printed even in quiet mode.
    pub fn report(&self, report: &ScaffoldReport) -> CliResult<()> {
        if self.resolved_format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            self.term.write_line(&json)?;
            return Ok(());
        }
        if self.quiet {
            return Ok(());
        }
        for line in summary_lines(report, !self.no_color) {
            self.term.write_line(&line)?;
        }
        Ok(())
    }
}

/// Human-readable summary, one entry per line.
fn summary_lines(report: &ScaffoldReport, color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let headline = format!("{} completed", report.generator);
    lines.push(if color {
        format!("{} {}", "\u{2713}".green().bold(), headline.green())
    } else {
        format!("\u{2713} {headline}")
    });

    if report.is_empty() {
        lines.push("  nothing changed".into());
    }

    let mut section = |title: &str, marker: &str, entries: Vec<String>| {
        if entries.is_empty() {
            return;
        }
        lines.push(if color {
            format!("  {}", title.bold())
        } else {
            format!("  {title}")
        });
        for entry in entries {
            lines.push(format!("    {marker} {entry}"));
        }
    };

    section("Created:", "+", report.created.clone());
    section(
        "Renamed:",
        "~",
        report
            .renamed
            .iter()
            .map(|r| format!("{} -> {}", r.from, r.to))
            .collect(),
    );
    section("Updated:", "*", report.updated.clone());
    section("Deleted:", "-", report.deleted.clone());

    for warning in &report.warnings {
        lines.push(if color {
            format!("{} {}", "\u{26a0}".yellow().bold(), warning.yellow())
        } else {
            format!("\u{26a0} {warning}")
        });
    }

    lines
}

// ── tests ─────────────────────────────────────────────────────────────────────
