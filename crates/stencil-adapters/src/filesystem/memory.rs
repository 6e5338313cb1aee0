//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stencil_core::{
    application::{ApplicationError, DirEntry, Filesystem},
    error::{StencilError, StencilResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and
/// inspect the other afterwards. Listings come out sorted by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dirs(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> StencilResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> StencilResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> StencilError {
    StencilError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn not_found(path: &Path) -> StencilError {
    ApplicationError::filesystem(path, "No such file or directory").into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.is_dir(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().map(|inner| inner.is_dir(path)).unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.is_dir(parent) {
                return Err(ApplicationError::filesystem(path, "Parent directory does not exist").into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        self.write()?.add_dirs(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;

        if let Some(content) = inner.files.remove(from) {
            if let Some(parent) = to.parent() {
                inner.add_dirs(parent);
            }
            inner.files.insert(to.to_path_buf(), content);
            return Ok(());
        }
        if !inner.is_dir(from) {
            return Err(not_found(from));
        }

        let moved_files: Vec<_> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved_files {
            if let (Some(content), Ok(rest)) = (inner.files.remove(&old), old.strip_prefix(from)) {
                inner.files.insert(to.join(rest), content);
            }
        }

        let moved_dirs: Vec<_> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved_dirs {
            inner.directories.remove(&old);
            if let Ok(rest) = old.strip_prefix(from) {
                let new = to.join(rest);
                inner.add_dirs(&new);
            }
        }
        inner.add_dirs(to);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn list_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        let inner = self.read()?;
        let is_child = |p: &Path| p.parent() == Some(path);

        let mut entries: Vec<DirEntry> = inner
            .directories
            .iter()
            .filter(|p| is_child(p))
            .map(DirEntry::dir)
            .chain(
                inner
                    .files
                    .keys()
                    .filter(|p| is_child(p))
                    .map(DirEntry::file),
            )
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.ts"), "").is_err());

        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.ts"), "a").unwrap();
        assert_eq!(fs.read_file("/p/a.ts").as_deref(), Some("a"));
    }

    #[test]
    fn directory_rename_moves_everything_below_it() {
        let fs = MemoryFilesystem::new()
            .with_file("/p/src/domain/domain-name/services/x.ts", "x")
            .with_file("/p/src/domain/domain-name/dtos/y.ts", "y");
        fs.create_dir_all(Path::new("/p/src/domain/domain-name/clients"))
            .unwrap();

        fs.rename(
            Path::new("/p/src/domain/domain-name"),
            Path::new("/p/src/domain/orders"),
        )
        .unwrap();

        assert!(!fs.exists(Path::new("/p/src/domain/domain-name")));
        assert!(fs.is_dir(Path::new("/p/src/domain/orders/clients")));
        assert_eq!(
            fs.read_file("/p/src/domain/orders/services/x.ts").as_deref(),
            Some("x")
        );
        assert_eq!(
            fs.read_file("/p/src/domain/orders/dtos/y.ts").as_deref(),
            Some("y")
        );
    }

    #[test]
    fn list_dir_returns_immediate_children_sorted() {
        let fs = MemoryFilesystem::new()
            .with_file("/p/b.ts", "")
            .with_file("/p/a/deep.ts", "");

        let entries = fs.list_dir(Path::new("/p")).unwrap();
        assert_eq!(
            entries,
            vec![DirEntry::dir("/p/a"), DirEntry::file("/p/b.ts")]
        );
        assert!(fs.list_dir(Path::new("/missing")).unwrap().is_empty());
    }

    #[test]
    fn remove_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs.remove_file(Path::new("/p/x")).is_err());
    }
}
