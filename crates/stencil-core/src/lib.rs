//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! generators: the interactive tools that turn an MCP server template into a
//! named project and keep extending it with domains, services, clients, and
//! tools.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, GeneratorSession)    │
//! │         Orchestrates Generators         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: Filesystem, Prompt)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, LinePrompt, etc)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (NameDeriver, RewriteSpec, BlockAnchor)│
//! │             No I/O                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let service = ScaffoldService::new(Box::new(filesystem), ProjectLayout::new("."));
//! let report = service.run(GeneratorKind::NewClient, &mut prompt)?;
//! for path in &report.created {
//!     println!("created {path}");
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, DirEntry, Filesystem, GeneratorKind, ProjectLayout, Prompt,
        ScaffoldReport, ScaffoldService,
    };
    pub use crate::domain::{
        ArtifactKind, DerivedNameSet, DomainError, NameDeriver, RewriteSpec, to_camel_case,
        to_kebab_case, to_pascal_case, to_upper_snake_case,
    };
    pub use crate::error::{ErrorCategory, StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
