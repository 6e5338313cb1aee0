//! In-place edits of existing source files.
//!
//! Every edit reads the file, transforms the text with a pure domain
//! function, and writes back only when something changed. A missing file is
//! reported as an outcome, not an error; the caller decides whether that is
//! worth a warning.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{BlockAnchor, BlockDocument, EntryStyle, RewriteSpec, ensure_import},
    error::StencilResult,
};

/// Result of applying a [`RewriteSpec`] to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteOutcome {
    Changed,
    Unchanged,
    MissingFile,
}

/// Result of an anchored insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertOutcome {
    Inserted,
    /// Only for imports: the exact line already exists.
    AlreadyPresent,
    AnchorNotFound,
    MissingFile,
}

/// Text-region rewriter over the filesystem port.
pub struct FileRewriter<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> FileRewriter<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Apply `spec` to the file at `path`.
    #[instrument(skip_all, fields(path = %path.display(), rules = spec.len()))]
    pub fn rewrite_file(&self, path: &Path, spec: &RewriteSpec) -> StencilResult<RewriteOutcome> {
        let Some(text) = self.read(path)? else {
            return Ok(RewriteOutcome::MissingFile);
        };

        let out = spec.apply(&text);
        if !out.changed {
            debug!("no rule matched");
            return Ok(RewriteOutcome::Unchanged);
        }

        self.fs.write_file(path, &out.text)?;
        Ok(RewriteOutcome::Changed)
    }

    /// Append an object entry inside the block located by `anchor`.
    #[instrument(skip_all, fields(path = %path.display(), anchor = anchor.label()))]
    pub fn insert_entry(
        &self,
        path: &Path,
        anchor: &BlockAnchor,
        entry: &str,
        style: EntryStyle,
    ) -> StencilResult<InsertOutcome> {
        self.splice(path, anchor, |doc| doc.insert_entry(entry, style))
    }

    /// Append a class member inside the block located by `anchor`.
    #[instrument(skip_all, fields(path = %path.display(), anchor = anchor.label()))]
    pub fn insert_member(
        &self,
        path: &Path,
        anchor: &BlockAnchor,
        member: &str,
    ) -> StencilResult<InsertOutcome> {
        self.splice(path, anchor, |doc| doc.insert_member(member))
    }

    /// Add an import line unless it is already present.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn ensure_import(&self, path: &Path, line: &str) -> StencilResult<InsertOutcome> {
        let Some(text) = self.read(path)? else {
            return Ok(InsertOutcome::MissingFile);
        };

        match ensure_import(&text, line) {
            Some(out) => {
                self.fs.write_file(path, &out)?;
                Ok(InsertOutcome::Inserted)
            }
            None => Ok(InsertOutcome::AlreadyPresent),
        }
    }

    /// Run `check` against the located block without editing.
    pub fn inspect<T>(
        &self,
        path: &Path,
        anchor: &BlockAnchor,
        check: impl FnOnce(&BlockDocument<'_>) -> T,
    ) -> StencilResult<Option<T>> {
        let Some(text) = self.read(path)? else {
            return Ok(None);
        };
        Ok(BlockDocument::locate(&text, anchor).map(|doc| check(&doc)))
    }

    fn splice(
        &self,
        path: &Path,
        anchor: &BlockAnchor,
        edit: impl FnOnce(&BlockDocument<'_>) -> String,
    ) -> StencilResult<InsertOutcome> {
        let Some(text) = self.read(path)? else {
            return Ok(InsertOutcome::MissingFile);
        };
        let Some(doc) = BlockDocument::locate(&text, anchor) else {
            return Ok(InsertOutcome::AnchorNotFound);
        };

        let out = edit(&doc);
        self.fs.write_file(path, &out)?;
        Ok(InsertOutcome::Inserted)
    }

    fn read(&self, path: &Path) -> StencilResult<Option<String>> {
        if !self.fs.exists(path) {
            debug!("file missing");
            return Ok(None);
        }
        self.fs.read_to_string(path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;

    const TOOLS: &str = "export const tools = {\n  \"get-data\": () => svc.getData()\n};\n";

    fn fs_with(path: &'static str, text: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(move |p| p == Path::new(path))
            .return_const(true);
        fs.expect_read_to_string()
            .withf(move |p| p == Path::new(path))
            .returning(move |_| Ok(text.to_string()));
        fs
    }

    #[test]
    fn rewrite_writes_only_when_changed() {
        let mut fs = fs_with("a.ts", "getData();");
        fs.expect_write_file()
            .withf(|p, text| p == Path::new("a.ts") && text == "createOrder();")
            .times(1)
            .returning(|_, _| Ok(()));

        let rewriter = FileRewriter::new(&fs);
        let spec = RewriteSpec::new().word("getData", "createOrder");
        assert_eq!(
            rewriter.rewrite_file(Path::new("a.ts"), &spec).unwrap(),
            RewriteOutcome::Changed
        );
    }

    #[test]
    fn rewrite_without_match_is_unchanged() {
        let mut fs = fs_with("a.ts", "createOrder();");
        fs.expect_write_file().never();

        let spec = RewriteSpec::new().word("getData", "createOrder");
        assert_eq!(
            FileRewriter::new(&fs)
                .rewrite_file(Path::new("a.ts"), &spec)
                .unwrap(),
            RewriteOutcome::Unchanged
        );
    }

    #[test]
    fn missing_file_is_an_outcome() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let rewriter = FileRewriter::new(&fs);
        let anchor = BlockAnchor::exported_object("tools").unwrap();
        assert_eq!(
            rewriter
                .rewrite_file(Path::new("gone.ts"), &RewriteSpec::new())
                .unwrap(),
            RewriteOutcome::MissingFile
        );
        assert_eq!(
            rewriter
                .insert_entry(Path::new("gone.ts"), &anchor, "a: 1", EntryStyle::default())
                .unwrap(),
            InsertOutcome::MissingFile
        );
    }

    #[test]
    fn insert_entry_fixes_comma() {
        let mut fs = fs_with("src/mcp/tools.ts", TOOLS);
        fs.expect_write_file()
            .withf(|_, text| text.contains("svc.getData(),\n  \"b\": 1,\n};"))
            .times(1)
            .returning(|_, _| Ok(()));

        let anchor = BlockAnchor::exported_object("tools").unwrap();
        let outcome = FileRewriter::new(&fs)
            .insert_entry(
                Path::new("src/mcp/tools.ts"),
                &anchor,
                "\"b\": 1",
                EntryStyle {
                    trailing_comma: true,
                },
            )
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);
    }

    #[test]
    fn unknown_anchor_leaves_file_alone() {
        let mut fs = fs_with("src/env.ts", "export default {};\n");
        fs.expect_write_file().never();

        let anchor = BlockAnchor::exported_object("env").unwrap();
        let outcome = FileRewriter::new(&fs)
            .insert_entry(Path::new("src/env.ts"), &anchor, "A: 1", EntryStyle::default())
            .unwrap();
        assert_eq!(outcome, InsertOutcome::AnchorNotFound);
    }

    #[test]
    fn duplicate_import_is_not_written() {
        let mut fs = fs_with("a.ts", "import { A } from \"./a\";\n");
        fs.expect_write_file().never();

        let outcome = FileRewriter::new(&fs)
            .ensure_import(Path::new("a.ts"), "import { A } from \"./a\";")
            .unwrap();
        assert_eq!(outcome, InsertOutcome::AlreadyPresent);
    }
}
