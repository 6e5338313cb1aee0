//! The five generator subcommands.
//!
//! Questions go to stderr and answers come from stdin, leaving stdout for
//! the summary (or JSON report).

use stencil_adapters::{LocalFilesystem, StdinPrompt};
use stencil_core::application::{GeneratorKind, ScaffoldService};
use tracing::{info, instrument};

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Run one generator against the project at `--root`.
#[instrument(skip_all, fields(generator = %kind))]
pub fn execute(
    kind: GeneratorKind,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let layout = config.layout(&global.root);
    info!(root = %layout.root().display(), "running generator");

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), layout);
    let mut prompt = StdinPrompt::stdio();
    let report = service.run(kind, &mut prompt)?;

    output.report(&report)
}
