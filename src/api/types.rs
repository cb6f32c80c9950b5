use serde::{Deserialize, Serialize};

/// Request body for the chat endpoint.
///
/// The backend correlates messages to one logical conversation via
/// `session_id`; the field names are part of the wire contract.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

/// Response body from the chat endpoint.
///
/// A body without a `response` field fails deserialization and surfaces
/// as [`ClientError::Parse`](super::ClientError::Parse).
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}
