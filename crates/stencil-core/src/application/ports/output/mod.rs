//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::StencilResult;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }

    /// Final path component.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are passed through as given; the caller joins them onto the
/// project root.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()>;

    /// Delete a single file.
    fn remove_file(&self, path: &Path) -> StencilResult<()>;

    /// Immediate children of `path` in listing order. A missing directory
    /// lists as empty.
    fn list_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>>;
}

/// Port for interactive input.
///
/// Implemented by:
/// - `stencil_adapters::prompt::StdinPrompt` (production)
/// - `stencil_adapters::prompt::ScriptedPrompt` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Show `question` and block for one line. End of input reads as "".
    fn ask(&mut self, question: &str) -> StencilResult<String>;

    /// Show informational text (selection menus, headers).
    fn show(&mut self, text: &str) -> StencilResult<()>;
}
