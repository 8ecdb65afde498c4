//! Graphwire core
//!
//! I/O-free building blocks for talking to a remote graph service over
//! JSON-over-HTTP:
//!
//! - **Resource identifiers** (`node:<type>`, `edge:<type>.<source>.<target>`)
//!   used to address stored graph elements.
//! - **Traversal builder**: a fluent API that records a list of stages and
//!   materializes the nested traversal document the server executes.
//! - **Console grammar**: a pest parser for the `graph ...` / `g ...` commands
//!   typed at the interactive shell.
//!
//! The HTTP client lives in the `graphwire-sdk` crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphwire::TraversalBuilder;
//!
//! let doc = TraversalBuilder::new()
//!     .is("Person")
//!     .has("id", "p1")
//!     .out(["friend"])
//!     .is("Person")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(doc.node_type.as_deref(), Some("Person"));
//! assert_eq!(doc.depth(), 1);
//! ```

#![warn(clippy::all)]

pub mod console;
pub mod graph;
pub mod traversal;

pub use console::{parse_command, Command, ConsoleError, ConsoleResult, GraphCommand};
pub use graph::ResourceId;
pub use traversal::{
    Direction, Hop, HopDocument, Stage, TraversalBuilder, TraversalDocument, TraversalError,
    TraversalResult, DEFAULT_HOP_LIMIT, DEFAULT_STAGE_LIMIT, MAX_HOPS,
};

/// Default endpoint of the graph service
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8231";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the crate version
pub fn version() -> &'static str {
    VERSION
}
