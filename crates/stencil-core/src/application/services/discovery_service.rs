//! Domain discovery.
//!
//! Scans `src/domain/*` and reports what is there. Missing optional
//! directories list as empty; deciding whether an empty list is fatal is up
//! to the generator that asked.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{layout::ProjectLayout, ports::Filesystem},
    domain::{ArtifactKind, DiscoveredEntity, EntityKind, first_exported_class, naming::SOURCE_EXT},
    error::StencilResult,
};

pub struct DiscoveryService<'a> {
    fs: &'a dyn Filesystem,
    layout: &'a ProjectLayout,
}

impl<'a> DiscoveryService<'a> {
    pub fn new(fs: &'a dyn Filesystem, layout: &'a ProjectLayout) -> Self {
        Self { fs, layout }
    }

    /// Immediate subdirectories of `src/domain`, each labelled with the
    /// class of its first service.
    #[instrument(skip_all)]
    pub fn list_domains(&self) -> StencilResult<Vec<DiscoveredEntity>> {
        let mut domains = Vec::new();

        for entry in self.fs.list_dir(&self.layout.domains_dir())? {
            if !entry.is_dir {
                continue;
            }
            let name = entry.name();
            let class_name = self
                .list_services(&name)?
                .into_iter()
                .next()
                .map(|s| s.class_name)
                .unwrap_or_default();

            domains.push(DiscoveredEntity::domain(name, class_name, entry.path));
        }

        debug!(count = domains.len(), "domains discovered");
        Ok(domains)
    }

    /// Services in `<domain>/services`, or the legacy `<domain>/service.ts`
    /// when that directory does not exist.
    #[instrument(skip(self))]
    pub fn list_services(&self, domain: &str) -> StencilResult<Vec<DiscoveredEntity>> {
        let services_dir = self.layout.services_dir(domain);

        if !self.fs.is_dir(&services_dir) {
            let legacy = self.layout.legacy_service(domain);
            if !self.fs.exists(&legacy) {
                return Ok(Vec::new());
            }
            debug!(path = %legacy.display(), "using legacy service file");
            return Ok(self
                .classify(&legacy, EntityKind::Service, domain)?
                .into_iter()
                .collect());
        }

        let ending = format!(".{SOURCE_EXT}");
        self.scan(&services_dir, domain, EntityKind::Service, |name| {
            name.ends_with(&ending) && !name.ends_with(&format!(".d{ending}"))
        })
    }

    /// Clients of `kind` in `<domain>/clients`.
    #[instrument(skip(self))]
    pub fn list_clients(
        &self,
        domain: &str,
        kind: ArtifactKind,
    ) -> StencilResult<Vec<DiscoveredEntity>> {
        let ending = kind.file_ending();
        self.scan(
            &self.layout.clients_dir(domain),
            domain,
            EntityKind::from(kind),
            |name| name.ends_with(&ending),
        )
    }

    fn scan(
        &self,
        dir: &Path,
        domain: &str,
        kind: EntityKind,
        accept: impl Fn(&str) -> bool,
    ) -> StencilResult<Vec<DiscoveredEntity>> {
        let mut found = Vec::new();
        for entry in self.fs.list_dir(dir)? {
            if entry.is_dir || !accept(&entry.name()) {
                continue;
            }
            if let Some(entity) = self.classify(&entry.path, kind, domain)? {
                found.push(entity);
            }
        }
        Ok(found)
    }

    fn classify(
        &self,
        path: &Path,
        kind: EntityKind,
        domain: &str,
    ) -> StencilResult<Option<DiscoveredEntity>> {
        let source = self.fs.read_to_string(path)?;
        match first_exported_class(&source) {
            Some(class_name) => Ok(Some(DiscoveredEntity::artifact(
                kind,
                domain,
                class_name,
                path.to_path_buf(),
            ))),
            None => {
                debug!(path = %path.display(), "no exported class, skipping");
                Ok(None)
            }
        }
    }
}
