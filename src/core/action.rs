//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The endpoint replies? That's `Action::ResponseReceived(text)`.
//!
//! The `update()` function takes the current state and an action,
//! then returns an `Effect` for the caller to carry out. No side effects
//! here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: drive a full submit/settle cycle with
//! plain function calls and assert on the conversation.
//!
//! ## The submit protocol
//!
//! `Submit` either does nothing (whitespace-only draft, or a request is
//! already in flight) or performs exactly this sequence: append the user
//! turn, clear the draft, raise `is_loading`, and hand the message to the
//! caller via `Effect::SendMessage`. The caller dispatches the request and
//! must deliver exactly one of `ResponseReceived` / `ResponseFailed` back;
//! both settlement arms lower `is_loading`, so the flag is released on
//! every path.

use log::{error, info};

use crate::core::state::{App, ChatTurn, ERROR_REPLY, READY_STATUS, SENDING_STATUS};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a character to the draft ('\n' for Shift+Enter).
    InsertChar(char),
    /// Append pasted text to the draft, embedded newlines intact.
    InsertStr(String),
    /// Remove the last character of the draft.
    Backspace,
    /// Send the current draft.
    Submit,
    /// The request settled with the assistant's reply.
    ResponseReceived(String),
    /// The request settled with an error; the value is diagnostic only.
    ResponseFailed(String),
    /// Flip between light and dark.
    ToggleTheme,
    Quit,
}

/// Work the caller must perform after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Dispatch the message to the backend on a background task.
    SendMessage(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::InsertChar(c) => {
            app.draft.push(c);
            Effect::None
        }
        Action::InsertStr(text) => {
            app.draft.push_str(&text);
            Effect::None
        }
        Action::Backspace => {
            app.draft.pop();
            Effect::None
        }
        Action::Submit => {
            // Guard: whitespace-only drafts and concurrent submits are no-ops.
            if app.draft.trim().is_empty() || app.is_loading {
                return Effect::None;
            }

            // The emptiness check above trims; the stored and transmitted
            // content does not.
            let message = std::mem::take(&mut app.draft);
            app.conversation.push(ChatTurn::user(message.clone()));
            app.is_loading = true;
            app.status_message = String::from(SENDING_STATUS);
            info!("Submitting message ({} bytes)", message.len());
            Effect::SendMessage(message)
        }
        Action::ResponseReceived(text) => {
            app.conversation.push(ChatTurn::assistant(text));
            app.is_loading = false;
            app.status_message = String::from(READY_STATUS);
            Effect::None
        }
        Action::ResponseFailed(reason) => {
            // The reason is logged, never shown; the user sees a fixed reply.
            error!("Chat request failed: {reason}");
            app.conversation.push(ChatTurn::assistant(ERROR_REPLY));
            app.is_loading = false;
            app.status_message = String::from(READY_STATUS);
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggle();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
