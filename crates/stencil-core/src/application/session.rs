//! Per-invocation generator state.
//!
//! A [`GeneratorSession`] owns the prompt handle, the filesystem port, the
//! layout, and the running [`ScaffoldReport`]. Generators receive it
//! explicitly and perform every effect through it, so each structural or
//! content change is recorded exactly once.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    application::{
        layout::ProjectLayout,
        ports::{Filesystem, Prompt},
        services::{DiscoveryService, FileRewriter, InsertOutcome, RewriteOutcome},
    },
    domain::{
        BlockAnchor, DiscoveredEntity, DomainError, EntityKind, EntryStyle, InputRole, RawInput,
        RenameKind, RenameStep, RewriteSpec, Selection,
    },
    error::StencilResult,
};

/// The five generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    InitProject,
    NewDomain,
    NewService,
    NewClient,
    NewTool,
}

impl GeneratorKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitProject => "init-project",
            Self::NewDomain => "new-domain",
            Self::NewService => "new-service",
            Self::NewClient => "new-client",
            Self::NewTool => "new-tool",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded move, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedPath {
    pub kind: RenameKind,
    pub from: String,
    pub to: String,
}

/// What a generator did. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub generator: GeneratorKind,
    pub created: Vec<String>,
    pub renamed: Vec<RenamedPath>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    pub fn new(generator: GeneratorKind) -> Self {
        Self {
            generator,
            created: Vec::new(),
            renamed: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.renamed.is_empty()
            && self.updated.is_empty()
            && self.deleted.is_empty()
    }

    fn record_updated(&mut self, path: String) {
        if !self.updated.contains(&path) && !self.created.contains(&path) {
            self.updated.push(path);
        }
    }
}

pub struct GeneratorSession<'a> {
    prompt: &'a mut dyn Prompt,
    fs: &'a dyn Filesystem,
    layout: &'a ProjectLayout,
    report: ScaffoldReport,
}

impl<'a> GeneratorSession<'a> {
    pub fn new(
        generator: GeneratorKind,
        prompt: &'a mut dyn Prompt,
        fs: &'a dyn Filesystem,
        layout: &'a ProjectLayout,
    ) -> Self {
        Self {
            prompt,
            fs,
            layout,
            report: ScaffoldReport::new(generator),
        }
    }

    pub fn layout(&self) -> &'a ProjectLayout {
        self.layout
    }

    pub fn fs(&self) -> &'a dyn Filesystem {
        self.fs
    }

    pub fn discovery(&self) -> DiscoveryService<'a> {
        DiscoveryService::new(self.fs, self.layout)
    }

    pub fn rewriter(&self) -> FileRewriter<'a> {
        FileRewriter::new(self.fs)
    }

    pub fn report(&self) -> &ScaffoldReport {
        &self.report
    }

    pub fn finish(self) -> ScaffoldReport {
        self.report
    }

    // ------------------------------------------------------------------
    // Prompts
    // ------------------------------------------------------------------

    pub fn ask(&mut self, role: InputRole, question: &str) -> StencilResult<RawInput> {
        let answer = self.prompt.ask(&format!("{question}: "))?;
        let raw = RawInput::new(role, answer);
        debug!(role = ?role, answer = raw.as_str(), "answer received");
        Ok(raw)
    }

    /// Ask, showing the value used for a blank answer.
    pub fn ask_with_default(
        &mut self,
        role: InputRole,
        question: &str,
        default: &str,
    ) -> StencilResult<RawInput> {
        let answer = self.prompt.ask(&format!("{question} ({default}): "))?;
        let raw = RawInput::new(role, answer);
        debug!(role = ?role, answer = raw.as_str(), "answer received");
        Ok(raw)
    }

    pub fn show(&mut self, text: &str) -> StencilResult<()> {
        self.prompt.show(text)
    }

    /// Present `entities` as a numbered menu and resolve the answer against
    /// that same list. An empty list is fatal.
    pub fn select(
        &mut self,
        kind: EntityKind,
        entities: &[DiscoveredEntity],
        location: &Path,
    ) -> StencilResult<Selection> {
        if entities.is_empty() {
            return Err(DomainError::NothingToSelect {
                entity: kind.label(),
                location: self.layout.relative(location),
            }
            .into());
        }

        self.show_menu(kind, entities)?;
        let raw = self.ask(InputRole::Selection, &format!("Select a {}", kind.label()))?;
        Ok(Selection::resolve(&raw, entities, kind)?)
    }

    /// Optional menu: skipped entirely when `entities` is empty, and a blank
    /// answer selects nothing.
    pub fn select_optional(
        &mut self,
        kind: EntityKind,
        entities: &[DiscoveredEntity],
    ) -> StencilResult<Option<Selection>> {
        if entities.is_empty() {
            return Ok(None);
        }

        self.show_menu(kind, entities)?;
        let raw = self.ask(
            InputRole::Selection,
            &format!("Select a {} (blank for none)", kind.label()),
        )?;
        Ok(Selection::resolve_optional(&raw, entities, kind)?)
    }

    fn show_menu(&mut self, kind: EntityKind, entities: &[DiscoveredEntity]) -> StencilResult<()> {
        let mut menu = format!("Available {}s:", kind.label());
        for (i, entity) in entities.iter().enumerate() {
            menu.push('\n');
            menu.push_str(&entity.menu_line(i + 1));
        }
        self.show(&menu)
    }

    // ------------------------------------------------------------------
    // Structural changes
    // ------------------------------------------------------------------

    /// Create a directory unless it already exists.
    pub fn create_dir(&mut self, path: &Path) -> StencilResult<()> {
        if self.fs.is_dir(path) {
            return Ok(());
        }
        self.fs.create_dir_all(path)?;
        info!(path = %path.display(), "directory created");
        let label = format!("{}/", self.layout.relative(path));
        self.report.created.push(label);
        Ok(())
    }

    pub fn rename(&mut self, step: &RenameStep) -> StencilResult<()> {
        self.fs.rename(&step.from, &step.to)?;
        info!(from = %step.from.display(), to = %step.to.display(), "renamed");
        self.report.renamed.push(RenamedPath {
            kind: step.kind,
            from: self.layout.relative(&step.from),
            to: self.layout.relative(&step.to),
        });
        Ok(())
    }

    pub fn remove_file(&mut self, path: &Path) -> StencilResult<()> {
        self.fs.remove_file(path)?;
        info!(path = %path.display(), "deleted");
        self.report.deleted.push(self.layout.relative(path));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Content changes
    // ------------------------------------------------------------------

    /// Write a file that must not exist yet.
    pub fn create_file(&mut self, path: &Path, content: &str) -> StencilResult<()> {
        if let Some(parent) = path.parent() {
            if !self.fs.is_dir(parent) {
                self.fs.create_dir_all(parent)?;
            }
        }
        self.fs.write_file(path, content)?;
        info!(path = %path.display(), "file created");
        self.report.created.push(self.layout.relative(path));
        Ok(())
    }

    /// Write `content` unless the file exists; warn with `what` otherwise.
    /// Returns whether the file was written.
    pub fn create_file_if_absent(
        &mut self,
        path: &Path,
        content: &str,
        what: &str,
    ) -> StencilResult<bool> {
        if self.fs.exists(path) {
            self.warn(format!(
                "{what} already exists at {}, left unchanged",
                self.layout.relative(path)
            ));
            return Ok(false);
        }
        self.create_file(path, content)?;
        Ok(true)
    }

    /// Replace the contents of an existing file.
    pub fn overwrite(&mut self, path: &Path, content: &str) -> StencilResult<()> {
        self.fs.write_file(path, content)?;
        self.report.record_updated(self.layout.relative(path));
        Ok(())
    }

    pub fn rewrite(&mut self, path: &Path, spec: &RewriteSpec) -> StencilResult<RewriteOutcome> {
        let outcome = self.rewriter().rewrite_file(path, spec)?;
        match outcome {
            RewriteOutcome::Changed => self.report.record_updated(self.layout.relative(path)),
            RewriteOutcome::Unchanged => {}
            RewriteOutcome::MissingFile => self.warn(format!(
                "{} not found, skipped rewrite",
                self.layout.relative(path)
            )),
        }
        Ok(outcome)
    }

    pub fn insert_entry(
        &mut self,
        path: &Path,
        anchor: &BlockAnchor,
        entry: &str,
        style: EntryStyle,
    ) -> StencilResult<InsertOutcome> {
        let outcome = self.rewriter().insert_entry(path, anchor, entry, style)?;
        self.record_insert(path, anchor, outcome);
        Ok(outcome)
    }

    pub fn insert_member(
        &mut self,
        path: &Path,
        anchor: &BlockAnchor,
        member: &str,
    ) -> StencilResult<InsertOutcome> {
        let outcome = self.rewriter().insert_member(path, anchor, member)?;
        self.record_insert(path, anchor, outcome);
        Ok(outcome)
    }

    pub fn ensure_import(&mut self, path: &Path, line: &str) -> StencilResult<InsertOutcome> {
        let outcome = self.rewriter().ensure_import(path, line)?;
        match outcome {
            InsertOutcome::Inserted => self.report.record_updated(self.layout.relative(path)),
            InsertOutcome::MissingFile => self.warn(format!(
                "{} not found, import not added",
                self.layout.relative(path)
            )),
            InsertOutcome::AlreadyPresent | InsertOutcome::AnchorNotFound => {}
        }
        Ok(outcome)
    }

    fn record_insert(&mut self, path: &Path, anchor: &BlockAnchor, outcome: InsertOutcome) {
        let rel = self.layout.relative(path);
        match outcome {
            InsertOutcome::Inserted => self.report.record_updated(rel),
            InsertOutcome::AnchorNotFound => {
                self.warn(format!("`{}` not found in {rel}, skipped", anchor.label()))
            }
            InsertOutcome::MissingFile => self.warn(format!("{rel} not found, skipped")),
            InsertOutcome::AlreadyPresent => {}
        }
    }

    /// Log and record a non-fatal problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.report.warnings.push(message);
    }
}
