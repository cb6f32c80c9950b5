//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ChatBackend, ClientError};
use crate::core::state::{App, Theme};

/// A backend for tests that never hit the network and don't care about the
/// reply.
pub struct NoopBackend;

#[async_trait]
impl ChatBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send_message(&self, _message: &str) -> Result<String, ClientError> {
        Ok(String::new())
    }
}

/// A backend that always replies with a fixed text.
pub struct CannedBackend {
    reply: String,
}

impl CannedBackend {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    async fn send_message(&self, _message: &str) -> Result<String, ClientError> {
        Ok(self.reply.clone())
    }
}

/// A backend that always fails with a network error.
pub struct FailingBackend;

#[async_trait]
impl ChatBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send_message(&self, _message: &str) -> Result<String, ClientError> {
        Err(ClientError::Network("connection refused".to_string()))
    }
}

/// Creates a test App with a NoopBackend and the default theme.
pub fn test_app() -> App {
    App::new(Arc::new(NoopBackend), Theme::default())
}
