// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! Pure logic: case conversion, name derivation, template bodies, rewrite
//! rules, and the block model used for anchored insertion. Nothing here
//! touches the filesystem or the terminal; those concerns are reached
//! through the ports in `crate::application::ports`.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: text in, text out
//! - **Deterministic**: every derived name is a function of the answers
//! - **Immutable values**: derived names and plans are Clone + PartialEq

pub mod anchored;
pub mod casing;
pub mod entities;
pub mod error;
pub mod naming;
pub mod rewrite;
pub mod templates;

mod validation;

pub use anchored::{BlockAnchor, BlockDocument, EntryStyle, ensure_import};
pub use casing::{
    CaseForm, convert, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case,
    to_upper_snake_case,
};
pub use entities::{
    DiscoveredEntity, EntityKind, PackageManifest, RenameKind, RenamePlan, RenameStep, Selection,
    first_exported_class,
};
pub use error::{DomainError, ErrorCategory};
pub use naming::{
    ArtifactKind, DerivedNameSet, DtoNames, InputRole, NameDeriver, RawInput, ToolNames,
};
pub use rewrite::{RewriteSpec, Rewritten};
pub use templates::{ClientRef, RenderContext, ServiceWiring, TemplateKind};
pub use validation::InputValidator;
