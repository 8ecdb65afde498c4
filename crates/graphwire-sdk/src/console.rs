//! Executes parsed console commands against a [`GraphClient`]

use graphwire::{Command, GraphCommand};
use tracing::debug;

use crate::client::GraphClient;
use crate::error::GraphResult;
use crate::models::StoredObject;

/// What a console command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Result of a resource call
    Object(Option<StoredObject>),
    /// Result of a traversal or path query
    Results(Vec<StoredObject>),
}

/// Run one command; exactly one request is issued and awaited.
pub async fn execute<C>(client: &C, command: &Command) -> GraphResult<CommandOutput>
where
    C: GraphClient + ?Sized,
{
    match command {
        Command::Graph(graph) => execute_graph(client, graph).await,
        Command::Traverse(builder) => {
            let document = builder.build()?;
            debug!(hops = document.depth(), "submitting traversal");
            client.traverse(&document).await.map(CommandOutput::Results)
        }
    }
}

async fn execute_graph<C>(client: &C, command: &GraphCommand) -> GraphResult<CommandOutput>
where
    C: GraphClient + ?Sized,
{
    let output = match command {
        GraphCommand::CreateNode { node_type, body } => {
            CommandOutput::Object(client.create_node(node_type, body).await?)
        }
        GraphCommand::CreateEdge {
            edge_type,
            source,
            target,
            body,
        } => CommandOutput::Object(client.create_edge(edge_type, source, target, body).await?),
        GraphCommand::Get(id) => CommandOutput::Object(client.get(id).await?),
        GraphCommand::Delete(id) => CommandOutput::Object(client.delete(id).await?),
        GraphCommand::QueryNodes { node_type, id, out } => CommandOutput::Results(
            client
                .query_nodes(node_type, id.as_deref(), out.as_deref())
                .await?,
        ),
    };
    Ok(output)
}
