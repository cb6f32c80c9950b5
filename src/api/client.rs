//! HTTP client for the chat endpoint.
//!
//! One request, one reply. The client carries no state between calls and
//! performs no retries, no timeouts, and no validation beyond reading the
//! `response` field. Errors propagate to the caller untransformed; the
//! recovery policy lives in the reducer, not here.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{ChatRequest, ChatResponse};

/// Errors that can occur while talking to the chat endpoint.
#[derive(Debug)]
pub enum ClientError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The endpoint returned a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// The seam between the conversation logic and the network.
///
/// The TUI only ever sees this trait, so tests can drive the full submit
/// protocol against a canned backend without a server.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Forwards one user message and returns the assistant's reply text.
    async fn send_message(&self, message: &str) -> Result<String, ClientError>;
}

/// Backend that POSTs to a configured HTTP endpoint.
pub struct HttpChatClient {
    endpoint_url: String,
    session_id: String,
    client: reqwest::Client,
}

impl HttpChatClient {
    /// Endpoint URL and session id are explicit construction-time
    /// configuration; see `core::config` for how they are resolved.
    pub fn new(endpoint_url: String, session_id: String) -> Self {
        Self {
            endpoint_url,
            session_id,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_message(&self, message: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            session_id: &self.session_id,
            message,
        };

        info!(
            "POST {} (session={}, {} bytes)",
            self.endpoint_url,
            self.session_id,
            message.len()
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        debug!("chat endpoint status: {status}");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("chat endpoint error: {} - {}", status.as_u16(), message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        debug!("chat endpoint reply: {} bytes", reply.response.len());
        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (HTTP 500): Internal Server Error"
        );

        let err = ClientError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
