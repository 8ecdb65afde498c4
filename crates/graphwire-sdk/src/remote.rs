//! RemoteGraph — HTTP client for a running graph service

use async_trait::async_trait;
use graphwire::{ResourceId, TraversalBuilder, TraversalDocument, DEFAULT_ENDPOINT};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::client::GraphClient;
use crate::config::ClientConfig;
use crate::error::{GraphError, GraphResult};
use crate::models::{StoredObject, OBJECT_FIELD, RESULTS_FIELD};

/// Characters escaped when a resource id or type becomes one path segment.
/// `:` and `.` stay literal since they structure the identifiers.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Network client for the graph service.
///
/// Uses `/v1/resources/<id>` for CRUD, `/v1/traverse` for traversals and
/// `/v1/query/nodes/...` for path queries.
pub struct RemoteGraph {
    endpoint: String,
    http_client: Client,
}

impl RemoteGraph {
    /// Create a client for the given base URL with no timeouts.
    ///
    /// # Example
    /// ```no_run
    /// # use graphwire_sdk::RemoteGraph;
    /// let graph = RemoteGraph::new("http://localhost:8231");
    /// ```
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    /// Create a client from a validated configuration
    pub fn with_config(config: ClientConfig) -> GraphResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http_client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Start a new traversal
    pub fn traversal(&self) -> TraversalBuilder {
        TraversalBuilder::new()
    }

    fn resource_url(&self, id: &ResourceId) -> String {
        format!("{}/v1/resources/{}", self.endpoint, encode_segment(id.as_str()))
    }

    fn query_url(&self, node_type: &str, id: Option<&str>, out: Option<&str>) -> String {
        let mut url = format!("{}/v1/query/nodes/{}", self.endpoint, encode_segment(node_type));
        // The server only routes `out` below an id
        if let Some(id) = id {
            url.push('/');
            url.push_str(&encode_segment(id));
            if let Some(out) = out {
                url.push('/');
                url.push_str(&encode_segment(out));
            }
        }
        url
    }

    /// Send one request and return the decoded JSON body with its status
    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> GraphResult<(StatusCode, Value)> {
        debug!(%method, url, "sending graph request");

        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "graph response");

        let value = if bytes.is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_slice(&bytes)?
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        if !status.is_success() {
            let message = match &value {
                Value::Object(map) => error_message(map),
                _ => None,
            }
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            warn!(status = status.as_u16(), %message, url, "graph request failed");
            return Err(GraphError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok((status, value))
    }

    /// Send a request and pull `field` out of the response envelope
    async fn send_for<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        field: &str,
    ) -> GraphResult<Option<T>> {
        let (status, value) = self.send(method, url, body).await?;

        let mut map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => return Err(GraphError::UnexpectedResponse(other.to_string())),
        };

        match map.remove(field) {
            Some(Value::Null) | None => {
                // The server can report errors under a success status
                if let Some(message) = error_message(&map) {
                    warn!(status = status.as_u16(), %message, url, "graph request failed");
                    return Err(GraphError::Server {
                        status: status.as_u16(),
                        message,
                    });
                }
                Ok(None)
            }
            Some(inner) => Ok(Some(serde_json::from_value(inner)?)),
        }
    }
}

impl Default for RemoteGraph {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Prefer the human readable `message`, then a string `error`
fn error_message(body: &Map<String, Value>) -> Option<String> {
    if let Some(Value::String(message)) = body.get("message") {
        return Some(message.clone());
    }
    match body.get("error") {
        Some(Value::String(error)) => Some(error.clone()),
        _ => None,
    }
}

#[async_trait]
impl GraphClient for RemoteGraph {
    async fn create_node(&self, node_type: &str, body: &Value) -> GraphResult<Option<StoredObject>> {
        let url = self.resource_url(&ResourceId::node(node_type));
        self.send_for(Method::PUT, &url, Some(body), OBJECT_FIELD).await
    }

    async fn create_edge(
        &self,
        edge_type: &str,
        source: &str,
        target: &str,
        body: &Value,
    ) -> GraphResult<Option<StoredObject>> {
        let url = self.resource_url(&ResourceId::edge(edge_type, source, target));
        self.send_for(Method::PUT, &url, Some(body), OBJECT_FIELD).await
    }

    async fn get(&self, id: &ResourceId) -> GraphResult<Option<StoredObject>> {
        let url = self.resource_url(id);
        self.send_for(Method::GET, &url, None, OBJECT_FIELD).await
    }

    async fn delete(&self, id: &ResourceId) -> GraphResult<Option<StoredObject>> {
        let url = self.resource_url(id);
        self.send_for(Method::DELETE, &url, None, OBJECT_FIELD).await
    }

    async fn traverse(&self, traversal: &TraversalDocument) -> GraphResult<Vec<StoredObject>> {
        let url = format!("{}/v1/traverse", self.endpoint);
        let body = serde_json::to_value(traversal)?;
        let results: Option<Vec<StoredObject>> =
            self.send_for(Method::POST, &url, Some(&body), RESULTS_FIELD).await?;
        Ok(results.unwrap_or_default())
    }

    async fn query_nodes(
        &self,
        node_type: &str,
        id: Option<&str>,
        out: Option<&str>,
    ) -> GraphResult<Vec<StoredObject>> {
        let url = self.query_url(node_type, id, out);
        let results: Option<Vec<StoredObject>> =
            self.send_for(Method::GET, &url, None, RESULTS_FIELD).await?;
        Ok(results.unwrap_or_default())
    }
}
