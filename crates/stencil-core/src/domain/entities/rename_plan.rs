use std::path::{Path, PathBuf};

use serde::Serialize;

/// Whether a step moves a directory or a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameKind {
    Directory,
    File,
}

/// One move, expressed in paths valid at the moment it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameStep {
    pub kind: RenameKind,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Ordered renames for one invocation.
///
/// Steps are recorded in pre-rename terms. [`RenamePlan::steps`] yields every
/// directory move first, then every file move with both ends rebased onto
/// the renamed directories, so a file nested in a moved directory is
/// addressed at its new location.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    directories: Vec<RenameStep>,
    files: Vec<RenameStep>,
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity moves are dropped.
    pub fn rename_dir(mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        let (from, to) = (from.into(), to.into());
        if from != to {
            self.directories.push(RenameStep {
                kind: RenameKind::Directory,
                from,
                to,
            });
        }
        self
    }

    /// Identity moves are dropped.
    pub fn rename_file(mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        let (from, to) = (from.into(), to.into());
        if from != to {
            self.files.push(RenameStep {
                kind: RenameKind::File,
                from,
                to,
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    /// Executable steps: directories, then rebased files.
    pub fn steps(&self) -> Vec<RenameStep> {
        let mut steps = self.directories.clone();
        steps.extend(self.files.iter().map(|f| RenameStep {
            kind: RenameKind::File,
            from: self.rebase(&f.from),
            to: self.rebase(&f.to),
        }));
        steps.retain(|s| s.from != s.to);
        steps
    }

    /// Where `path` (pre-rename) lives once the plan has run.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let rebased = self.rebase(path);
        self.files
            .iter()
            .find(|f| self.rebase(&f.from) == rebased)
            .map(|f| self.rebase(&f.to))
            .unwrap_or(rebased)
    }

    fn rebase(&self, path: &Path) -> PathBuf {
        self.directories
            .iter()
            .fold(path.to_path_buf(), |current, dir| {
                match current.strip_prefix(&dir.from) {
                    Ok(rest) if rest.as_os_str().is_empty() => dir.to.clone(),
                    Ok(rest) => dir.to.join(rest),
                    Err(_) => current,
                }
            })
    }
}
