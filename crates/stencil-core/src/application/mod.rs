//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, DiscoveryService, FileRewriter)
//! - **Generators**: The five interactive generators
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! naming or text-transformation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod generators;
pub mod layout;
pub mod ports;
pub mod services;
pub mod session;

// Re-export main services
pub use services::{DiscoveryService, FileRewriter, InsertOutcome, RewriteOutcome, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, Filesystem, Prompt};

pub use error::ApplicationError;
pub use layout::ProjectLayout;
pub use session::{GeneratorKind, GeneratorSession, RenamedPath, ScaffoldReport};
