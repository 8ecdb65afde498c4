//! Error types for the graphwire SDK

use graphwire::TraversalError;
use thiserror::Error;

/// Errors that can occur when talking to the graph service
#[derive(Error, Debug)]
pub enum GraphError {
    /// Connection or transport failure; never retried
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The traversal could not be materialized
    #[error("Traversal error: {0}")]
    Traversal(#[from] TraversalError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    /// Whether the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, GraphError::Transport(_))
    }

    /// HTTP status reported by the server, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
