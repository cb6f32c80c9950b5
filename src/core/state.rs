//! # Application State
//!
//! Core business state for Parley. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>   // chat endpoint
//! ├── conversation: Conversation      // append-only turn history
//! ├── draft: String                   // pending input buffer
//! ├── is_loading: bool                // awaiting a reply
//! ├── theme: Theme                    // light or dark
//! └── status_message: String          // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::api::ChatBackend;

/// Seeded assistant turn shown before the user has typed anything.
pub const GREETING: &str = "Hello! 👋 I'm your AI Assistant. How can I help you today?";

/// Fixed reply appended when a request fails. The actual error goes to the
/// log; the user only ever sees this text.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Default title bar status.
pub const READY_STATUS: &str = "Always here to help";

/// Title bar status while a request is outstanding.
pub const SENDING_STATUS: &str = "Sending...";

/// Author of a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in the conversation. Immutable once appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only sequence of turns. Insertion order is display
/// order; turns are never mutated, removed, or reordered, which is why
/// the backing Vec is private.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Creates a conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            turns: vec![ChatTurn::assistant(GREETING)],
        }
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}

/// Two-valued color theme. Toggling is synchronous and idempotent per
/// press; it never touches the conversation or the network.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub conversation: Conversation,
    pub draft: String,
    pub is_loading: bool,
    pub theme: Theme,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, theme: Theme) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            draft: String::new(),
            is_loading: false,
            theme,
            status_message: String::from(READY_STATUS),
        }
    }
}
