pub mod discovered;
pub mod manifest;
pub mod rename_plan;

pub use discovered::{DiscoveredEntity, EntityKind, Selection, first_exported_class};
pub use manifest::PackageManifest;
pub use rename_plan::{RenameKind, RenamePlan, RenameStep};
