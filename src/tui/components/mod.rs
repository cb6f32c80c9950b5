//! # TUI Components
//!
//! Components follow two patterns:
//!
//! **Stateless (props-based)**: created fresh each frame with the data
//! they need. `TitleBar`, `Message`, `InputBox`.
//!
//! **Stateful (event-driven)**: persistent state lives in a `*State`
//! struct owned by `TuiState`, the transient component wraps a mutable
//! reference to it. `MessageList` / `MessageListState`.
//!
//! Components receive external data as props rather than reading global
//! state, which keeps dependencies explicit and the pieces testable in
//! isolation.

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use input_box::InputBox;
pub use message::Message;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
