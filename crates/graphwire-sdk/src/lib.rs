//! Graphwire SDK — client library for the graphwire graph service
//!
//! - **`GraphClient`** — the client interface: resource CRUD, traversals and
//!   path queries, each a single request/response round-trip.
//! - **`RemoteGraph`** — `GraphClient` over JSON-over-HTTP.
//! - **`console::execute`** — runs a parsed console command against any
//!   `GraphClient`.
//!
//! Non-2xx responses are reported as [`GraphError::Server`]; connection
//! failures as [`GraphError::Transport`]. Nothing is retried.
//!
//! # Quick Start
//!
//! ```no_run
//! use graphwire_sdk::{GraphClient, RemoteGraph};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let graph = RemoteGraph::new("http://localhost:8231");
//!
//!     graph.create_node("Person", &json!({"id": "p1", "name": "Ann"}))
//!         .await.unwrap();
//!
//!     let friends = graph
//!         .run(&graph.traversal().is("Person").has("id", "p1").out(["friend"]))
//!         .await.unwrap();
//!     println!("Found {} friends", friends.len());
//! }
//! ```

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod remote;

pub use client::GraphClient;
pub use config::ClientConfig;
pub use console::{execute, CommandOutput};
pub use error::{GraphError, GraphResult};
pub use models::StoredObject;
pub use remote::RemoteGraph;

// Core types (re-exported from graphwire)
pub use graphwire::{
    parse_command, Command, Direction, GraphCommand, ResourceId, TraversalBuilder,
    TraversalDocument, TraversalError, DEFAULT_ENDPOINT,
};
pub use graphwire::console::HELP as CONSOLE_HELP;
