//! GraphClient trait — the interface the console and applications program against

use async_trait::async_trait;
use graphwire::{ResourceId, TraversalBuilder, TraversalDocument};
use serde_json::Value;

use crate::error::GraphResult;
use crate::models::StoredObject;

/// Client interface for the graph service.
///
/// Every operation is a single request/response round-trip with no retry.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Upsert a node of `node_type` (PUT `node:<type>`)
    async fn create_node(&self, node_type: &str, body: &Value) -> GraphResult<Option<StoredObject>>;

    /// Upsert an edge (PUT `edge:<type>.<source>.<target>`)
    async fn create_edge(
        &self,
        edge_type: &str,
        source: &str,
        target: &str,
        body: &Value,
    ) -> GraphResult<Option<StoredObject>>;

    /// Fetch a resource by identifier
    async fn get(&self, id: &ResourceId) -> GraphResult<Option<StoredObject>>;

    /// Delete a resource by identifier
    async fn delete(&self, id: &ResourceId) -> GraphResult<Option<StoredObject>>;

    /// Submit a traversal document
    async fn traverse(&self, traversal: &TraversalDocument) -> GraphResult<Vec<StoredObject>>;

    /// Nodes of a type, optionally one id and one outgoing edge type deep
    async fn query_nodes(
        &self,
        node_type: &str,
        id: Option<&str>,
        out: Option<&str>,
    ) -> GraphResult<Vec<StoredObject>>;

    /// Build a traversal and submit it
    async fn run(&self, builder: &TraversalBuilder) -> GraphResult<Vec<StoredObject>> {
        let document = builder.build()?;
        self.traverse(&document).await
    }
}
