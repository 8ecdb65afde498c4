//! Client configuration

use graphwire::DEFAULT_ENDPOINT;
use reqwest::Url;
use std::time::Duration;

use crate::error::{GraphError, GraphResult};

/// Configuration for [`crate::RemoteGraph`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the graph service
    pub endpoint: String,
    /// Whole-request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,
    /// Connection establishment timeout
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Check that the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> GraphResult<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| GraphError::InvalidConfig(format!("endpoint {}: {}", self.endpoint, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GraphError::InvalidConfig(format!(
                "endpoint {} uses unsupported scheme {}",
                self.endpoint, scheme
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8231");
        assert_eq!(config.timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::new("https://graph.internal:9000")
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.connect_timeout, Some(Duration::from_millis(250)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(matches!(
            ClientConfig::new("localhost:8231").validate(),
            Err(GraphError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://localhost").validate(),
            Err(GraphError::InvalidConfig(_))
        ));
    }
}
