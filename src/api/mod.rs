pub mod client;
pub mod types;

pub use client::{ChatBackend, ClientError, HttpChatClient};
pub use types::{ChatRequest, ChatResponse};
