//! Data models for the graph service responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored key/value object: a node, or one direction of an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Storage key
    #[serde(rename = "Key")]
    pub key: String,
    /// Body, absent when the server did not load it
    #[serde(rename = "Val", default)]
    pub value: Option<Map<String, Value>>,
}

impl StoredObject {
    /// Look up a body field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.value.as_ref().and_then(|body| body.get(name))
    }
}

/// Response envelope field carrying a single object
pub(crate) const OBJECT_FIELD: &str = "object";

/// Response envelope field carrying traversal or query results
pub(crate) const RESULTS_FIELD: &str = "results";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_stored_object() {
        let obj: StoredObject =
            serde_json::from_value(json!({"Key": "Person_p1", "Val": {"name": "Ann"}})).unwrap();
        assert_eq!(obj.key, "Person_p1");
        assert_eq!(obj.field("name"), Some(&json!("Ann")));
        assert_eq!(obj.field("age"), None);
    }

    #[test]
    fn test_decode_object_without_body() {
        let obj: StoredObject = serde_json::from_value(json!({"Key": "k", "Val": null})).unwrap();
        assert_eq!(obj.value, None);

        let obj: StoredObject = serde_json::from_value(json!({"Key": "k"})).unwrap();
        assert_eq!(obj.value, None);
    }
}
