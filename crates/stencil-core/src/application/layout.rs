//! Fixed project layout.

use std::path::{Component, Path, PathBuf};

use crate::domain::naming::SOURCE_EXT;

/// Manifest file name, relative to the root.
pub const DEFAULT_MANIFEST: &str = "package.json";

/// `scripts` key of the init command.
pub const DEFAULT_INIT_SCRIPT_KEY: &str = "init-project";

/// Init script, relative to the root.
pub const DEFAULT_INIT_SCRIPT_PATH: &str = "scripts/init-project.ts";

/// Where everything lives inside a project.
///
/// Every accessor returns a path joined onto the root, ready to hand to the
/// filesystem port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    manifest: PathBuf,
    init_script_key: String,
    init_script_path: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            init_script_key: DEFAULT_INIT_SCRIPT_KEY.to_string(),
            init_script_path: PathBuf::from(DEFAULT_INIT_SCRIPT_PATH),
        }
    }

    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    pub fn with_init_script(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.init_script_key = key.into();
        self.init_script_path = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn manifest(&self) -> PathBuf {
        self.path(&self.manifest)
    }

    pub fn init_script(&self) -> PathBuf {
        self.path(&self.init_script_path)
    }

    pub fn init_script_key(&self) -> &str {
        &self.init_script_key
    }

    pub fn domains_dir(&self) -> PathBuf {
        self.path("src/domain")
    }

    pub fn domain_dir(&self, domain: &str) -> PathBuf {
        self.domains_dir().join(domain)
    }

    pub fn services_dir(&self, domain: &str) -> PathBuf {
        self.domain_dir(domain).join("services")
    }

    pub fn clients_dir(&self, domain: &str) -> PathBuf {
        self.domain_dir(domain).join("clients")
    }

    pub fn dtos_dir(&self, domain: &str) -> PathBuf {
        self.domain_dir(domain).join("dtos")
    }

    pub fn utils_dir(&self, domain: &str) -> PathBuf {
        self.domain_dir(domain).join("utils")
    }

    /// Pre-`services/` single-file service.
    pub fn legacy_service(&self, domain: &str) -> PathBuf {
        self.domain_dir(domain).join(format!("service.{SOURCE_EXT}"))
    }

    pub fn api_utils(&self, domain: &str) -> PathBuf {
        self.utils_dir(domain).join(format!("api.utils.{SOURCE_EXT}"))
    }

    pub fn env_file(&self) -> PathBuf {
        self.path("src/env.ts")
    }

    pub fn tools_metadata(&self) -> PathBuf {
        self.path("src/tools.metadata.ts")
    }

    pub fn tools_registry(&self) -> PathBuf {
        self.path("src/mcp/tools.ts")
    }

    /// Import specifier for `file` as seen from `src/mcp/tools.ts`.
    pub fn registry_import(&self, file: &Path) -> String {
        let target = self.relative(file);
        let target = target.strip_suffix(".ts").unwrap_or(&target);
        match target.strip_prefix("src/") {
            Some(rest) => format!("../{rest}"),
            None => format!("../../{target}"),
        }
    }

    /// `path` relative to the root with `/` separators, for display and
    /// reports.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
