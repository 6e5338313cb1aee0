use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::naming::{ArtifactKind, RawInput};

static EXPORTED_CLASS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"export\s+(?:default\s+)?class\s+([A-Za-z_$][\w$]*)").ok());

/// Name of the first `export class` declared in `source`.
pub fn first_exported_class(source: &str) -> Option<String> {
    EXPORTED_CLASS
        .as_ref()?
        .captures(source)
        .map(|c| c[1].to_string())
}

/// What a discovered entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Domain,
    Service,
    HttpClient,
    DbClient,
}

impl EntityKind {
    /// Singular noun used in prompts and errors.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Service => "service",
            Self::HttpClient => "HTTP client",
            Self::DbClient => "DB client",
        }
    }

    pub const fn artifact(self) -> Option<ArtifactKind> {
        match self {
            Self::Domain => None,
            Self::Service => Some(ArtifactKind::Service),
            Self::HttpClient => Some(ArtifactKind::HttpClient),
            Self::DbClient => Some(ArtifactKind::DbClient),
        }
    }
}

impl From<ArtifactKind> for EntityKind {
    fn from(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::Service => Self::Service,
            ArtifactKind::HttpClient => Self::HttpClient,
            ArtifactKind::DbClient => Self::DbClient,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A domain, service, or client found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredEntity {
    pub kind: EntityKind,
    /// The domain directory this entity lives in.
    pub dir_name: String,
    /// Display name: the directory for domains, the artifact stem for files.
    pub name: String,
    /// Exported class; empty for a domain without services.
    pub class_name: String,
    pub path: PathBuf,
}

impl DiscoveredEntity {
    pub fn domain(dir_name: impl Into<String>, class_name: impl Into<String>, path: PathBuf) -> Self {
        let dir_name = dir_name.into();
        Self {
            kind: EntityKind::Domain,
            name: dir_name.clone(),
            dir_name,
            class_name: class_name.into(),
            path,
        }
    }

    /// An artifact file. `name` is derived from the file name by stripping
    /// the kind's ending (`orders.service.ts` → `orders`).
    pub fn artifact(
        kind: EntityKind,
        dir_name: impl Into<String>,
        class_name: impl Into<String>,
        path: PathBuf,
    ) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = kind
            .artifact()
            .and_then(|a| file_name.strip_suffix(&a.file_ending()).map(str::to_string))
            .or_else(|| file_name.strip_suffix(".ts").map(str::to_string))
            .unwrap_or(file_name);

        Self {
            kind,
            dir_name: dir_name.into(),
            name,
            class_name: class_name.into(),
            path,
        }
    }

    /// File name without `.ts`, used as an import specifier.
    pub fn module(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `  <n>) <name> (<ClassName>)`
    pub fn menu_line(&self, index: usize) -> String {
        if self.class_name.is_empty() {
            format!("  {index}) {}", self.name)
        } else {
            format!("  {index}) {} ({})", self.name, self.class_name)
        }
    }
}

/// A validated 1-based choice from a presented list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    entity: DiscoveredEntity,
}

impl Selection {
    /// Resolve `raw` against exactly the list that was shown.
    pub fn resolve(
        raw: &RawInput,
        entities: &[DiscoveredEntity],
        kind: EntityKind,
    ) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidSelection {
            entity: kind.label(),
            input: raw.as_str().to_string(),
            available: entities.len(),
        };

        let index: usize = raw.as_str().parse().map_err(|_| invalid())?;
        if index == 0 {
            return Err(invalid());
        }
        let entity = entities.get(index - 1).cloned().ok_or_else(invalid)?;

        Ok(Self { index, entity })
    }

    /// Like [`Selection::resolve`], but a blank answer means "none".
    pub fn resolve_optional(
        raw: &RawInput,
        entities: &[DiscoveredEntity],
        kind: EntityKind,
    ) -> Result<Option<Self>, DomainError> {
        if raw.is_blank() {
            return Ok(None);
        }
        Self::resolve(raw, entities, kind).map(Some)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entity(&self) -> &DiscoveredEntity {
        &self.entity
    }

    pub fn into_entity(self) -> DiscoveredEntity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::InputRole;

    fn domains() -> Vec<DiscoveredEntity> {
        vec![
            DiscoveredEntity::domain("orders", "OrdersService", PathBuf::from("src/domain/orders")),
            DiscoveredEntity::domain("weather", "", PathBuf::from("src/domain/weather")),
        ]
    }

    #[test]
    fn finds_first_exported_class() {
        let src = "import x from 'y';\nclass Hidden {}\nexport class OrdersService {}\nexport class Other {}";
        assert_eq!(first_exported_class(src).as_deref(), Some("OrdersService"));
        assert_eq!(first_exported_class("class Hidden {}"), None);
    }

    #[test]
    fn artifact_name_strips_kind_ending() {
        let e = DiscoveredEntity::artifact(
            EntityKind::HttpClient,
            "weather",
            "OpenMeteoHttpClient",
            PathBuf::from("src/domain/weather/clients/open-meteo.http.client.ts"),
        );
        assert_eq!(e.name, "open-meteo");
        assert_eq!(e.module(), "open-meteo.http.client");

        let legacy = DiscoveredEntity::artifact(
            EntityKind::Service,
            "weather",
            "WeatherService",
            PathBuf::from("src/domain/weather/service.ts"),
        );
        assert_eq!(legacy.name, "service");
        assert_eq!(legacy.module(), "service");
    }

    #[test]
    fn menu_lines() {
        let list = domains();
        assert_eq!(list[0].menu_line(1), "  1) orders (OrdersService)");
        assert_eq!(list[1].menu_line(2), "  2) weather");
    }

    #[test]
    fn selection_resolves_one_based() {
        let list = domains();
        let raw = RawInput::new(InputRole::Selection, " 2 ");
        let sel = Selection::resolve(&raw, &list, EntityKind::Domain).unwrap();
        assert_eq!(sel.index(), 2);
        assert_eq!(sel.entity().dir_name, "weather");
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        let list = domains();
        for input in ["0", "3", "99", "abc", "-1", ""] {
            let raw = RawInput::new(InputRole::Selection, input);
            let err = Selection::resolve(&raw, &list, EntityKind::Domain).unwrap_err();
            assert!(
                err.to_string().contains("Invalid domain selection"),
                "{input:?}: {err}"
            );
        }
    }

    #[test]
    fn optional_selection_accepts_blank() {
        let list = domains();
        let blank = RawInput::new(InputRole::Selection, "  ");
        assert!(
            Selection::resolve_optional(&blank, &list, EntityKind::HttpClient)
                .unwrap()
                .is_none()
        );
        let bad = RawInput::new(InputRole::Selection, "7");
        assert!(Selection::resolve_optional(&bad, &list, EntityKind::HttpClient).is_err());
    }
}
