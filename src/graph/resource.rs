//! Resource identifiers for stored graph elements

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a node type and its id in a node key
pub const NODE_KEY_SEPARATOR: char = '_';

/// Opaque key addressing a node or edge on the graph service.
///
/// Nodes are addressed as `node:<type>` (the server assigns or reads the id
/// from the body) or `node:<type>_<id>`; edges as
/// `edge:<type>.<source>.<target>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Identifier used to create a node of the given type
    pub fn node(node_type: impl AsRef<str>) -> Self {
        ResourceId(format!("node:{}", node_type.as_ref()))
    }

    /// Identifier of an existing node
    pub fn node_with_id(node_type: impl AsRef<str>, id: impl AsRef<str>) -> Self {
        ResourceId(format!(
            "node:{}{}{}",
            node_type.as_ref(),
            NODE_KEY_SEPARATOR,
            id.as_ref()
        ))
    }

    /// Identifier of an edge between two node keys
    pub fn edge(
        edge_type: impl AsRef<str>,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
    ) -> Self {
        ResourceId(format!(
            "edge:{}.{}.{}",
            edge_type.as_ref(),
            source.as_ref(),
            target.as_ref()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_resource_id() {
        assert_eq!(ResourceId::node("Person").as_str(), "node:Person");
        assert_eq!(
            ResourceId::node_with_id("Person", "p1").as_str(),
            "node:Person_p1"
        );
    }

    #[test]
    fn test_edge_resource_id() {
        let id = ResourceId::edge("friend", "Person_a", "Person_b");
        assert_eq!(id.as_str(), "edge:friend.Person_a.Person_b");
        assert_eq!(id.to_string(), "edge:friend.Person_a.Person_b");
    }

    #[test]
    fn test_raw_resource_id_is_opaque() {
        let id = ResourceId::from("whatever:not.parsed");
        assert_eq!(id.as_str(), "whatever:not.parsed");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"whatever:not.parsed\"");
    }
}
