//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (request in flight): draws every ~80ms so the typing
//!   indicator pulses and the settlement action is picked up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor
//! because ratatui's `set_cursor_position` resets the terminal's blink
//! timer on every `draw()` call, making blinking cursors appear erratic
//! during continuous redraws.

pub mod component;
pub mod components;
pub mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{ChatBackend, HttpChatClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::MessageListState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable the kitty keyboard protocol unconditionally (allows
        // Shift+Enter detection). Detection via
        // supports_keyboard_enhancement() fails in WSL, but the protocol is
        // harmlessly ignored by terminals that don't support it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpChatClient::new(
        config.endpoint_url.clone(),
        config.session_id.clone(),
    ));
    let mut app = App::new(backend, config.theme);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for settlement actions from the background request task
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // The typing indicator animates while a request is outstanding
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Scroll events go straight to the message list
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            // Everything else is a core action
            let action = match event {
                TuiEvent::ForceQuit | TuiEvent::Quit => Action::Quit,
                TuiEvent::Submit => Action::Submit,
                TuiEvent::InputChar(c) => Action::InsertChar(c),
                TuiEvent::Paste(text) => Action::InsertStr(text),
                TuiEvent::Backspace => Action::Backspace,
                TuiEvent::ToggleTheme => Action::ToggleTheme,
                _ => continue,
            };

            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SendMessage(message) => {
                    // New exchange: snap the view back to the bottom
                    tui.message_list.stick_to_bottom = true;
                    spawn_send(app.backend.clone(), message, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle settlement actions from the background request task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Maps the request outcome to its settlement action.
///
/// Exactly one settlement action exists per request, success or failure;
/// the reducer releases the awaiting-response flag on both arms.
async fn settle(backend: &dyn ChatBackend, message: &str) -> Action {
    match backend.send_message(message).await {
        Ok(reply) => Action::ResponseReceived(reply),
        Err(e) => Action::ResponseFailed(e.to_string()),
    }
}

/// Dispatches the request on a background task. The task's only output is
/// the settlement action sent back over `tx`.
fn spawn_send(backend: Arc<dyn ChatBackend>, message: String, tx: mpsc::Sender<Action>) {
    info!("Dispatching chat request ({} bytes)", message.len());
    tokio::spawn(async move {
        let action = settle(backend.as_ref(), &message).await;
        if tx.send(action).is_err() {
            warn!("Settlement dropped: event loop receiver closed");
        }
    });
}
