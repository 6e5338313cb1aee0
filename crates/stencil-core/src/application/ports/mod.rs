//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `Prompt`: One question, one answer
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`ScaffoldService`, called from the CLI)

pub mod output;

pub use output::{DirEntry, Filesystem, Prompt};

#[cfg(test)]
pub use output::{MockFilesystem, MockPrompt};
