//! # InputBox Component
//!
//! Renders the draft buffer and the submit affordances.
//!
//! The draft itself lives in core state (the reducer owns every edit), so
//! unlike the scrolling message list this component is stateless: it
//! receives the draft as a prop each frame, wraps it, and places the
//! terminal cursor after the last character. Editing is append-at-end,
//! which keeps the cursor math to "end of the last wrapped line".

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// Shown in dim text while the draft is empty.
const PLACEHOLDER: &str = "Type your message...";

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// The input grows with its content up to this many text rows, then the
/// oldest rows scroll out of view.
const MAX_VISIBLE_LINES: u16 = 6;

/// Text input component.
///
/// # Props
///
/// - `draft`: current input buffer (owned by core state)
/// - `is_loading`: whether a request is outstanding (submit disabled)
pub struct InputBox<'a> {
    pub draft: &'a str,
    pub is_loading: bool,
    pub palette: &'a Palette,
}

impl<'a> InputBox<'a> {
    pub fn new(draft: &'a str, is_loading: bool, palette: &'a Palette) -> Self {
        Self {
            draft,
            is_loading,
            palette,
        }
    }

    /// Required height for the draft at the given total width, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(draft: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = wrap_lines(draft, content_width).len() as u16;
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }
}

/// Wraps the draft into display rows. An empty draft (or a trailing
/// newline) still produces a row so the cursor has somewhere to sit.
fn wrap_lines(text: &str, content_width: u16) -> Vec<String> {
    if content_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let wrapped = textwrap::wrap(raw_line, options);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped.into_iter().map(|l| l.into_owned()));
        }
    }
    lines
}

/// Cursor position within the wrapped content: (column, row), where row is
/// relative to the first visible line.
fn cursor_offset(text: &str, content_width: u16) -> (u16, u16) {
    let lines = wrap_lines(text, content_width);
    let total = lines.len() as u16;
    let last = lines.last().map(String::as_str).unwrap_or("");
    let row = total.saturating_sub(1).min(MAX_VISIBLE_LINES - 1);
    (last.width() as u16, row)
}

impl<'a> Component for InputBox<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = wrap_lines(self.draft, content_width);

        // Keep the tail visible once the draft outgrows the box.
        let skip = lines.len().saturating_sub(MAX_VISIBLE_LINES as usize);
        let visible_text = lines[skip..].join("\n");

        let title = if self.is_loading {
            "Input (Sending...)"
        } else {
            "Input"
        };
        let border_style = if self.is_loading {
            Style::default().fg(self.palette.dim)
        } else {
            Style::default().fg(self.palette.user_accent)
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .title(title)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let paragraph = if self.draft.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(self.palette.dim)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(visible_text).style(Style::default().fg(self.palette.text))
        };

        let inner_area = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(paragraph, inner_area);

        let (cursor_x, cursor_y) = cursor_offset(self.draft, content_width);
        frame.set_cursor_position((
            area.x + 1 + CONTENT_PAD_H + cursor_x,
            area.y + 1 + cursor_y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use crate::tui::theme::palette;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw_to_text(draft: &str, is_loading: bool) -> String {
        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let p = palette(Theme::Dark);
        let mut input = InputBox::new(draft, is_loading, &p);
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_calculate_height_single_line() {
        assert_eq!(InputBox::calculate_height("hello", 40), 1 + VERTICAL_OVERHEAD);
        assert_eq!(InputBox::calculate_height("", 40), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_calculate_height_grows_with_newlines() {
        assert_eq!(
            InputBox::calculate_height("a\nb\nc", 40),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_calculate_height_clamped() {
        let tall = "1\n2\n3\n4\n5\n6\n7\n8\n9";
        assert_eq!(
            InputBox::calculate_height(tall, 40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_wrap_lines_empty_draft_has_cursor_row() {
        assert_eq!(wrap_lines("", 20), vec![String::new()]);
    }

    #[test]
    fn test_wrap_lines_trailing_newline_adds_row() {
        let lines = wrap_lines("hi\n", 20);
        assert_eq!(lines, vec!["hi".to_string(), String::new()]);
    }

    #[test]
    fn test_cursor_sits_after_last_character() {
        assert_eq!(cursor_offset("abc", 20), (3, 0));
        assert_eq!(cursor_offset("abc\nde", 20), (2, 1));
        assert_eq!(cursor_offset("hi\n", 20), (0, 1));
        assert_eq!(cursor_offset("", 20), (0, 0));
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let text = draw_to_text("", false);
        assert!(text.contains("Type your message..."));
    }

    #[test]
    fn test_render_shows_draft_instead_of_placeholder() {
        let text = draw_to_text("hello there", false);
        assert!(text.contains("hello there"));
        assert!(!text.contains("Type your message..."));
    }

    #[test]
    fn test_render_title_reflects_loading() {
        let text = draw_to_text("", true);
        assert!(text.contains("Sending..."));
    }
}
