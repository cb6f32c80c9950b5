//! Theme palettes.
//!
//! The two-valued [`Theme`] selector is domain state (core); the colors it
//! maps to are presentation and live here. RGB values follow the classic
//! chat-page look: green assistant accent, violet user accent, slate text.

use ratatui::style::Color;

use crate::core::state::Theme;

/// Concrete colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text (placeholder, hints, typing indicator).
    pub dim: Color,
    /// Accent for user turns.
    pub user_accent: Color,
    /// Accent for assistant turns.
    pub assistant_accent: Color,
}

/// Maps a theme to its palette.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            background: Color::Rgb(33, 33, 33),
            text: Color::Rgb(236, 236, 236),
            dim: Color::Rgb(156, 163, 175),
            user_accent: Color::Rgb(139, 92, 246),
            assistant_accent: Color::Rgb(16, 163, 127),
        },
        Theme::Light => Palette {
            background: Color::Rgb(248, 250, 252),
            text: Color::Rgb(30, 41, 59),
            dim: Color::Rgb(100, 116, 139),
            user_accent: Color::Rgb(139, 92, 246),
            assistant_accent: Color::Rgb(16, 163, 127),
        },
    }
}
