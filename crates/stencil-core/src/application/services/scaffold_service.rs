//! Scaffold Service - main application orchestrator.
//!
//! Entry point for every generator. The service owns the filesystem adapter
//! and the project layout; the caller supplies the prompt for each run.
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use tracing::{info, instrument};

use crate::{
    application::{
        generators::{init_project, new_client, new_domain, new_service, new_tool},
        layout::ProjectLayout,
        ports::{Filesystem, Prompt},
        session::{GeneratorKind, GeneratorSession, ScaffoldReport},
    },
    error::StencilResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    layout: ProjectLayout,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stencil_core::application::{ProjectLayout, ScaffoldService};
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     ProjectLayout::new("."),
    /// );
    /// let report = service.run(GeneratorKind::NewDomain, &mut prompt)?;
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, layout: ProjectLayout) -> Self {
        Self { filesystem, layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Run one generator to completion.
    ///
    /// Errors are fatal and returned as-is; recoverable problems end up in
    /// [`ScaffoldReport::warnings`].
    #[instrument(
        skip_all,
        fields(generator = %kind, root = %self.layout.root().display())
    )]
    pub fn run(&self, kind: GeneratorKind, prompt: &mut dyn Prompt) -> StencilResult<ScaffoldReport> {
        info!("Starting {kind}");

        let mut session =
            GeneratorSession::new(kind, prompt, self.filesystem.as_ref(), &self.layout);

        match kind {
            GeneratorKind::InitProject => init_project::run(&mut session)?,
            GeneratorKind::NewDomain => new_domain::run(&mut session)?,
            GeneratorKind::NewService => new_service::run(&mut session)?,
            GeneratorKind::NewClient => new_client::run(&mut session)?,
            GeneratorKind::NewTool => new_tool::run(&mut session)?,
        }

        let report = session.finish();
        info!(
            created = report.created.len(),
            renamed = report.renamed.len(),
            updated = report.updated.len(),
            deleted = report.deleted.len(),
            warnings = report.warnings.len(),
            "{kind} completed"
        );
        Ok(report)
    }

    pub fn init_project(&self, prompt: &mut dyn Prompt) -> StencilResult<ScaffoldReport> {
        self.run(GeneratorKind::InitProject, prompt)
    }

    pub fn new_domain(&self, prompt: &mut dyn Prompt) -> StencilResult<ScaffoldReport> {
        self.run(GeneratorKind::NewDomain, prompt)
    }

    pub fn new_service(&self, prompt: &mut dyn Prompt) -> StencilResult<ScaffoldReport> {
        self.run(GeneratorKind::NewService, prompt)
    }

    pub fn new_client(&self, prompt: &mut dyn Prompt) -> StencilResult<ScaffoldReport> {
        self.run(GeneratorKind::NewClient, prompt)
    }

    pub fn new_tool(&self, prompt: &mut dyn Prompt) -> StencilResult<ScaffoldReport> {
        self.run(GeneratorKind::NewTool, prompt)
    }
}
