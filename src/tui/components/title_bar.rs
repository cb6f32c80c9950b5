//! # TitleBar Component
//!
//! Single-line header: application name, active theme, and the transient
//! status message from core state ("Always here to help", "Sending...",
//! "Theme: light"). Purely presentational; all fields are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::core::state::Theme;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TitleBar<'a> {
    pub status_message: &'a str,
    pub theme: Theme,
    pub palette: &'a Palette,
}

impl<'a> TitleBar<'a> {
    pub fn new(status_message: &'a str, theme: Theme, palette: &'a Palette) -> Self {
        Self {
            status_message,
            theme,
            palette,
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("AI Assistant ({})", self.theme.label())
        } else {
            format!(
                "AI Assistant ({}) | {}",
                self.theme.label(),
                self.status_message
            )
        };

        frame.render_widget(
            Span::styled(title_text, Style::default().fg(self.palette.text)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::palette;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw_to_text(status: &str, theme: Theme) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let p = palette(theme);
        let mut title_bar = TitleBar::new(status, theme, &p);
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_status() {
        let text = draw_to_text("Sending...", Theme::Dark);
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("dark"));
        assert!(text.contains("Sending..."));
    }

    #[test]
    fn test_title_bar_without_status() {
        let text = draw_to_text("", Theme::Light);
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("light"));
        assert!(!text.contains('|'));
    }
}
