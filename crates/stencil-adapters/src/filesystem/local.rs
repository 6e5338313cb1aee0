//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stencil_core::{
    application::{ApplicationError, DirEntry, Filesystem},
    error::{StencilError, StencilResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        trace!(from = %from.display(), to = %to.display(), "rename");
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn list_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                StencilError::from(ApplicationError::filesystem(path, format!("Failed to list directory: {e}")))
            })?;
            entries.push(DirEntry {
                is_dir: entry.file_type().is_dir(),
                path: entry.into_path(),
            });
        }
        Ok(entries)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_dir_is_sorted_and_shallow() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&tmp.path().join("b/nested")).unwrap();
        fs.write_file(&tmp.path().join("c.ts"), "").unwrap();
        fs.create_dir_all(&tmp.path().join("a")).unwrap();

        let names: Vec<_> = fs
            .list_dir(tmp.path())
            .unwrap()
            .iter()
            .map(|e| (e.name(), e.is_dir))
            .collect();

        assert_eq!(
            names,
            vec![
                ("a".to_string(), true),
                ("b".to_string(), true),
                ("c.ts".to_string(), false)
            ]
        );
    }

    #[test]
    fn missing_directory_lists_as_empty() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.list_dir(&tmp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn rename_moves_a_directory_with_its_contents() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let old = tmp.path().join("domain-name/services");
        fs.create_dir_all(&old).unwrap();
        fs.write_file(&old.join("x.ts"), "x").unwrap();

        fs.rename(&tmp.path().join("domain-name"), &tmp.path().join("orders"))
            .unwrap();

        assert!(!fs.exists(&tmp.path().join("domain-name")));
        assert_eq!(
            fs.read_to_string(&tmp.path().join("orders/services/x.ts"))
                .unwrap(),
            "x"
        );
    }

    #[test]
    fn io_failures_carry_the_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.ts");
        let err = LocalFilesystem::new().read_to_string(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.ts"));
        assert!(err.to_string().contains("Failed to read file"));
    }
}
