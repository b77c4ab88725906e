use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ClientConfig;

pub mod http;
pub mod mock;

pub use http::HttpEndpoint;
pub use mock::MockEndpoint;

/// Fallback bot reply when the server answered but not successfully
pub const SERVER_ERROR_REPLY: &str = "Sorry, something went wrong! Please try again.";

/// Fallback bot reply when the request could not complete
pub const TRANSPORT_ERROR_REPLY: &str = "Sorry, I couldn't connect to the server. Please try again.";

/// The remote collaborator that turns one user message into one reply
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send a message and wait for the reply text
    async fn send(&self, message: &str) -> Result<String, EndpointError>;

    /// Get endpoint information
    fn info(&self) -> EndpointInfo;
}

/// Information about an endpoint
#[derive(Debug, Clone)]
pub struct EndpointInfo {
    pub name: String,
    pub target: String,
}

/// Coarse failure class; decides which fallback reply is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Server,
    Transport,
}

/// Errors that can occur while talking to the chat endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Reply has no `response` field")]
    MissingResponse,

    #[error("Reply body is not valid JSON: {0}")]
    Decode(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint configuration error: {0}")]
    Configuration(String),
}

impl EndpointError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EndpointError::Status(_) | EndpointError::MissingResponse => ErrorKind::Server,
            EndpointError::Decode(_)
            | EndpointError::Timeout
            | EndpointError::Transport(_)
            | EndpointError::Configuration(_) => ErrorKind::Transport,
        }
    }

    /// The fixed text shown to the user in place of a reply
    pub fn fallback_reply(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Server => SERVER_ERROR_REPLY,
            ErrorKind::Transport => TRANSPORT_ERROR_REPLY,
        }
    }
}

impl From<reqwest::Error> for EndpointError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            EndpointError::Timeout
        } else if error.is_decode() {
            EndpointError::Decode(error.to_string())
        } else {
            EndpointError::Transport(error.to_string())
        }
    }
}

/// Factory for creating endpoints
pub struct EndpointFactory;

impl EndpointFactory {
    /// HTTP endpoint for the configured URL
    pub fn create_http(config: &ClientConfig) -> Result<Arc<dyn ChatEndpoint>, EndpointError> {
        let endpoint = HttpEndpoint::new(config)?;
        Ok(Arc::new(endpoint))
    }

    /// Offline endpoint that echoes messages back
    pub fn create_mock() -> Arc<dyn ChatEndpoint> {
        Arc::new(MockEndpoint::new())
    }
}
