//! The nested traversal document submitted to `/v1/traverse`

use serde::{Deserialize, Serialize};
use std::iter;

use super::direction::Direction;
use super::DEFAULT_STAGE_LIMIT;

fn default_limit() -> u32 {
    DEFAULT_STAGE_LIMIT
}

/// One stage of a traversal: node-level filters plus an optional hop to the
/// following stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalDocument {
    /// Node type filter
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    /// Exact node id filter
    pub id: Option<String>,
    /// Result cap for this stage
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Aggregation markers such as `groupBy(id)`
    #[serde(default)]
    pub filters: Vec<String>,
    /// Hop to the next stage
    pub next: Option<Box<HopDocument>>,
}

/// An edge hop; exclusively owns the stage it leads to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopDocument {
    pub direction: Direction,
    /// Edge predicate evaluated by the server
    pub filter: Option<String>,
    /// Accepted edge types; empty accepts every type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub target: TraversalDocument,
}

impl Default for TraversalDocument {
    fn default() -> Self {
        Self {
            node_type: None,
            id: None,
            limit: DEFAULT_STAGE_LIMIT,
            filters: Vec::new(),
            next: None,
        }
    }
}

impl TraversalDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hops in the chain
    pub fn depth(&self) -> usize {
        self.hops().count()
    }

    /// Iterate over the hops from the root forward
    pub fn hops(&self) -> Hops<'_> {
        Hops {
            next: self.next.as_deref(),
        }
    }

    /// Iterate over every stage, root first
    pub fn stages(&self) -> impl Iterator<Item = &TraversalDocument> {
        iter::once(self).chain(self.hops().map(|hop| &hop.target))
    }

    /// The last stage of the chain
    pub fn tip(&self) -> &TraversalDocument {
        self.hops().last().map(|hop| &hop.target).unwrap_or(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Iterator over the hops of a traversal document
pub struct Hops<'a> {
    next: Option<&'a HopDocument>,
}

impl<'a> Iterator for Hops<'a> {
    type Item = &'a HopDocument;

    fn next(&mut self) -> Option<Self::Item> {
        let hop = self.next?;
        self.next = hop.target.next.as_deref();
        Some(hop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_hop_document() -> TraversalDocument {
        let last = TraversalDocument {
            node_type: Some("City".to_string()),
            ..Default::default()
        };
        let middle = TraversalDocument {
            next: Some(Box::new(HopDocument {
                direction: Direction::Out,
                filter: None,
                types: vec!["lives_in".to_string()],
                limit: 1000,
                target: last,
            })),
            ..Default::default()
        };
        TraversalDocument {
            node_type: Some("Person".to_string()),
            next: Some(Box::new(HopDocument {
                direction: Direction::In,
                filter: Some("weight > 1".to_string()),
                types: Vec::new(),
                limit: 2000,
                target: middle,
            })),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_document() {
        let doc = TraversalDocument::new();
        assert_eq!(doc.limit, DEFAULT_STAGE_LIMIT);
        assert!(doc.filters.is_empty());
        assert_eq!(doc.depth(), 0);
        assert_eq!(doc.tip(), &doc);
    }

    #[test]
    fn test_walk_stages() {
        let doc = two_hop_document();
        assert_eq!(doc.depth(), 2);
        assert_eq!(doc.stages().count(), 3);
        assert_eq!(doc.tip().node_type.as_deref(), Some("City"));

        let directions: Vec<Direction> = doc.hops().map(|h| h.direction).collect();
        assert_eq!(directions, vec![Direction::In, Direction::Out]);
    }

    #[test]
    fn test_empty_types_are_omitted() {
        let value = serde_json::to_value(two_hop_document()).unwrap();
        assert!(value["next"].get("types").is_none());
        assert_eq!(value["next"]["filter"], json!("weight > 1"));
        assert_eq!(value["next"]["target"]["next"]["types"], json!(["lives_in"]));
        assert_eq!(value["next"]["target"]["next"]["filter"], json!(null));
    }

    #[test]
    fn test_parse_sparse_document() {
        // Fields the server treats as optional
        let doc: TraversalDocument = serde_json::from_value(json!({
            "type": "Person",
            "next": { "direction": 0, "filter": null, "target": {} }
        }))
        .unwrap();

        assert_eq!(doc.limit, DEFAULT_STAGE_LIMIT);
        let hop = doc.next.as_ref().unwrap();
        assert_eq!(hop.limit, DEFAULT_STAGE_LIMIT);
        assert!(hop.types.is_empty());
        assert_eq!(hop.target, TraversalDocument::default());
    }
}
