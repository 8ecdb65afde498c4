//! Graphwire CLI — command-line interface and interactive console
//!
//! Uses the graphwire-sdk RemoteGraph to talk to a running graph service.

mod output;

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use graphwire_sdk::console::{self, CommandOutput};
use graphwire_sdk::{
    parse_command, ClientConfig, GraphClient, RemoteGraph, ResourceId, CONSOLE_HELP,
    DEFAULT_ENDPOINT,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use output::{render, OutputFormat};

const PROMPT: &str = "> ";

#[derive(Parser)]
#[command(name = "graphwire", version, about = "Graphwire graph service CLI")]
struct Cli {
    /// Graph service URL
    #[arg(long, default_value = DEFAULT_ENDPOINT, global = true, env = "GRAPHWIRE_URL")]
    url: String,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update a node of the given type
    CreateNode {
        node_type: String,
        /// JSON object body
        #[arg(default_value = "{}")]
        body: String,
    },
    /// Create or update an edge between two node keys
    CreateEdge {
        edge_type: String,
        source: String,
        target: String,
        /// JSON object body
        #[arg(default_value = "{}")]
        body: String,
    },
    /// Fetch a resource by identifier
    Get { id: String },
    /// Delete a resource by identifier
    Delete { id: String },
    /// Run a traversal written in console word form, e.g. `is Person out friend`
    Traverse {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        steps: Vec<String>,
    },
    /// Nodes of a type, optionally narrowed to an id and one outgoing edge type
    Query {
        node_type: String,
        id: Option<String>,
        out: Option<String>,
    },
    /// Start the interactive console (default)
    Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::new(cli.url);
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let graph = RemoteGraph::with_config(config)?;
    let format = cli.format;

    let output = match cli.command.unwrap_or(Commands::Shell) {
        Commands::CreateNode { node_type, body } => {
            let body = parse_body(&body)?;
            CommandOutput::Object(graph.create_node(&node_type, &body).await?)
        }
        Commands::CreateEdge {
            edge_type,
            source,
            target,
            body,
        } => {
            let body = parse_body(&body)?;
            CommandOutput::Object(graph.create_edge(&edge_type, &source, &target, &body).await?)
        }
        Commands::Get { id } => CommandOutput::Object(graph.get(&ResourceId::from(id)).await?),
        Commands::Delete { id } => CommandOutput::Object(graph.delete(&ResourceId::from(id)).await?),
        Commands::Traverse { steps } => {
            let line = traversal_line(&steps)?;
            let command = parse_command(&line)?;
            console::execute(&graph, &command).await?
        }
        Commands::Query { node_type, id, out } => CommandOutput::Results(
            graph
                .query_nodes(&node_type, id.as_deref(), out.as_deref())
                .await?,
        ),
        Commands::Shell => return run_shell(&graph, format).await,
    };

    println!("{}", render(&output, format)?);
    Ok(())
}

/// Rebuild a word-form `g` line, re-quoting words the shell split on
fn traversal_line(steps: &[String]) -> anyhow::Result<String> {
    let mut line = String::from("g");
    for step in steps {
        line.push(' ');
        if step.contains(char::is_whitespace) {
            line.push_str(&serde_json::to_string(step)?);
        } else {
            line.push_str(step);
        }
    }
    Ok(line)
}

fn parse_body(body: &str) -> anyhow::Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(body).context("body is not valid JSON")?;
    anyhow::ensure!(value.is_object(), "body must be a JSON object");
    Ok(value)
}

/// Read-eval-print loop. Each line is parsed and, when it reaches the
/// service, awaited before the next prompt is written.
async fn run_shell(graph: &RemoteGraph, format: OutputFormat) -> anyhow::Result<()> {
    println!("Graphwire console connected to {}", graph.endpoint());
    println!("Type :help for commands, :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => println!("{}", CONSOLE_HELP),
            input => {
                let command = match parse_command(input) {
                    Ok(command) => command,
                    Err(e) => {
                        warn!(error = %e, "error processing input");
                        continue;
                    }
                };
                match console::execute(graph, &command).await {
                    Ok(output) => match render(&output, format) {
                        Ok(text) => println!("{}", text),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_line_requotes_predicates() {
        let steps: Vec<String> = ["is", "Person", "out-filter", "weight > 2", "knows"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let line = traversal_line(&steps).unwrap();
        assert_eq!(line, r#"g is Person out-filter "weight > 2" knows"#);
        assert!(parse_command(&line).is_ok());
    }

    #[test]
    fn test_parse_body() {
        assert!(parse_body(r#"{"name": "Ann"}"#).is_ok());
        assert!(parse_body("[1]").is_err());
        assert!(parse_body("{oops").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["graphwire"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.command.is_none());
        assert!(cli.timeout.is_none());
    }
}
