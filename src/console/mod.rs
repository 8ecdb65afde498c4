//! Interactive console command language
//!
//! Lines typed at the shell are parsed into a fixed set of commands; nothing
//! is evaluated. `graph ...` lines address the resource client, `g ...` lines
//! build a traversal that the shell submits.

pub mod command;
pub mod parser;

pub use command::{parse_command, Command, GraphCommand};
pub use parser::{parse_line, Invocation, ParsedLine, Rule, Syntax, Target, Word};

use thiserror::Error;

/// Console errors
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Pest parsing error
    #[error("Parse error: {0}")]
    PestError(#[from] pest::error::Error<Rule>),

    /// Structural problem the grammar does not catch
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown graph operation: {0}")]
    UnknownCommand(String),

    #[error("Unknown traversal step: {0}")]
    UnknownStep(String),

    /// Wrong number of arguments for an operation or step
    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: &'static str,
        got: usize,
    },

    #[error("Invalid argument for {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Malformed JSON literal or string
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Usage text shown by the shell's `:help`
pub const HELP: &str = r#"Resource commands:
  graph create-node <type> [json]                  graph.createNode("Person", {"name": "Ann"})
  graph create-edge <type> <source> <target> [json]
  graph get <resource-id>                          graph.get("node:Person_p1")
  graph del <resource-id>
  graph query <type> [id] [edge-type]

Traversals (submitted immediately):
  g is <type>            g has id <id>           g limit <n>        g group-by <field>
  g out [types]          g in [types]            g both [types]
  g out-limit <n> [types]                        g out-filter <predicate> [types]
  (in-/both- variants as for out; types are comma separated)
  Quote a word that starts with ' " { [ or names a step: g out "has" is Pet
  g is Person has id p1 out friend is Person
  g.is("Person").has("id", "p1").out("friend").limitTo(10)

Shell:
  :help   Show this help
  :quit   Exit"#;
