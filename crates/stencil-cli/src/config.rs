//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate only sees the [`ProjectLayout`]
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `STENCIL__SECTION__KEY`
//! 2. `--config FILE` (must exist when given)
//! 3. `stencil.toml` in the project root
//! 4. The user config file (see [`AppConfig::config_path`])
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use stencil_core::application::{
    ProjectLayout,
    layout::{DEFAULT_INIT_SCRIPT_KEY, DEFAULT_INIT_SCRIPT_PATH, DEFAULT_MANIFEST},
};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Per-project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "stencil.toml";

const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Where the generators find the project files.
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Manifest path, relative to the root.
    pub manifest: PathBuf,
    /// `scripts` entry removed by init.
    pub init_script_key: String,
    /// Script file deleted by init, relative to the root.
    pub init_script_path: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            init_script_key: DEFAULT_INIT_SCRIPT_KEY.into(),
            init_script_path: PathBuf::from(DEFAULT_INIT_SCRIPT_PATH),
        }
    }
}

impl AppConfig {
    /// Load configuration for the project at `root`.
    ///
    /// `config_file` is the path the user passed via `--config`.
    pub fn load(config_file: Option<&PathBuf>, root: &Path) -> CliResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("output.no_color", defaults.output.no_color)
            .and_then(|b| {
                b.set_default(
                    "project.manifest",
                    defaults.project.manifest.to_string_lossy().into_owned(),
                )
            })
            .and_then(|b| {
                b.set_default("project.init_script_key", defaults.project.init_script_key)
            })
            .and_then(|b| {
                b.set_default(
                    "project.init_script_path",
                    defaults.project.init_script_path.to_string_lossy().into_owned(),
                )
            })
            .map_err(config_error)?;

        if let Some(user) = Self::user_config_path() {
            debug!(path = %user.display(), "user config");
            builder = builder.add_source(File::from(user).required(false));
        }
        builder = builder.add_source(File::from(root.join(PROJECT_CONFIG_FILE)).required(false));
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Project layout rooted at `root`, with configured file locations.
    pub fn layout(&self, root: &Path) -> ProjectLayout {
        ProjectLayout::new(root)
            .with_manifest(&self.project.manifest)
            .with_init_script(
                &self.project.init_script_key,
                &self.project.init_script_path,
            )
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        Self::user_config_path().unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }

    fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_template_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.project.manifest, PathBuf::from("package.json"));
        assert_eq!(cfg.project.init_script_key, "init-project");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn project_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[project]\ninit_script_key = \"setup\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, tmp.path()).unwrap();
        assert_eq!(cfg.project.init_script_key, "setup");
        assert_eq!(cfg.project.manifest, PathBuf::from("package.json"));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = AppConfig::load(Some(&missing), tmp.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[test]
    fn layout_uses_configured_paths() {
        let mut cfg = AppConfig::default();
        cfg.project.init_script_path = PathBuf::from("bin/setup.ts");
        let layout = cfg.layout(Path::new("/srv/app"));
        assert_eq!(layout.init_script(), PathBuf::from("/srv/app/bin/setup.ts"));
        assert_eq!(layout.manifest(), PathBuf::from("/srv/app/package.json"));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
