//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "add a tool" or "list the domains".

pub mod discovery_service;
pub mod rewrite_service;
pub mod scaffold_service;

pub use discovery_service::DiscoveryService;
pub use rewrite_service::{FileRewriter, InsertOutcome, RewriteOutcome};
pub use scaffold_service::ScaffoldService;
