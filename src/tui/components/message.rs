use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{ChatTurn, Role};
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless widget that renders a single chat turn.
///
/// `Message` is a transient component: it's created fresh each frame with
/// the data it needs to render and holds no mutable state.
///
/// Content is rendered literally. No trimming, no markup; embedded
/// newlines and whitespace appear exactly as stored in the turn. The two
/// roles are distinguished by accent color and title alignment (user turns
/// sit on the right, like the original chat bubbles).
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ChatTurn,
    pub palette: &'a Palette,
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ChatTurn, palette: &'a Palette) -> Self {
        Self { turn, palette }
    }

    /// Calculate the height required for this turn at the given width.
    ///
    /// Uses `textwrap` to predict the wrapped height without rendering,
    /// so the parent `MessageList` can lay out its scroll view first.
    /// The wrapping options must match `Paragraph` with `Wrap { trim: false }`
    /// to keep calculated and actual heights in sync.
    pub fn calculate_height(turn: &ChatTurn, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            // Return 1 row so the turn still occupies space in the layout.
            return 1;
        }

        // Paragraph treats each '\n'-separated line as its own wrap unit.
        let lines: u16 = turn
            .content
            .split('\n')
            .map(|line| {
                let options = textwrap::Options::new(content_width as usize)
                    .break_words(true)
                    .word_separator(textwrap::WordSeparator::AsciiSpace);
                textwrap::wrap(line, options).len().max(1) as u16
            })
            .sum();

        lines + VERTICAL_OVERHEAD
    }

    fn accent(&self) -> Style {
        let color = match self.turn.role {
            Role::User => self.palette.user_accent,
            Role::Assistant => self.palette.assistant_accent,
        };
        Style::default().fg(color)
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let accent = self.accent();
        let title_alignment = match self.turn.role {
            Role::User => Alignment::Right,
            Role::Assistant => Alignment::Left,
        };

        let block = Block::bordered()
            .title(self.turn.role.label())
            .title_alignment(title_alignment)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(accent)
            .title_style(accent)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(self.turn.content.as_str())
            .style(Style::default().fg(self.palette.text))
            .wrap(Wrap { trim: false });

        paragraph.render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use crate::tui::theme::palette;
    use ratatui::buffer::Buffer;

    fn render_to_text(turn: &ChatTurn, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let p = palette(Theme::Dark);
        Message::new(turn, &p).render(area, &mut buf);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ==========================================================================
    // calculate_height tests
    // ==========================================================================

    #[test]
    fn calculate_height_single_line_fits() {
        let turn = ChatTurn::user("Hello");
        assert_eq!(
            Message::calculate_height(&turn, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_empty_content_is_one_blank_line() {
        // An empty reply still renders as a bubble with one blank row.
        let turn = ChatTurn::assistant("");
        assert_eq!(
            Message::calculate_height(&turn, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let turn = ChatTurn::user("Hello world");
        assert_eq!(Message::calculate_height(&turn, 0), 1);
        assert_eq!(Message::calculate_height(&turn, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let turn = ChatTurn::user("Hello world");
        // "Hello world" = 11 chars, width 9 means content_width = 5,
        // wrapping to "Hello" | "world" = 2 lines
        assert_eq!(
            Message::calculate_height(&turn, 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        let turn = ChatTurn::user("abcdefghij");
        // 10 chars at content_width 4 breaks to "abcd" | "efgh" | "ij"
        assert_eq!(
            Message::calculate_height(&turn, 8),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_counts_embedded_newlines() {
        let turn = ChatTurn::user("one\ntwo\nthree");
        assert_eq!(
            Message::calculate_height(&turn, 80),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_blank_line_between_paragraphs() {
        let turn = ChatTurn::assistant("first\n\nsecond");
        // The empty middle line still occupies a row.
        assert_eq!(
            Message::calculate_height(&turn, 80),
            3 + VERTICAL_OVERHEAD
        );
    }

    // ==========================================================================
    // Rendering tests
    // ==========================================================================

    #[test]
    fn render_preserves_literal_content() {
        let turn = ChatTurn::user("line one\n  indented");
        let text = render_to_text(&turn, 30, 4);
        assert!(text.contains("line one"));
        assert!(
            text.contains("  indented"),
            "leading whitespace must survive rendering: {text:?}"
        );
    }

    #[test]
    fn render_shows_role_title() {
        let user_text = render_to_text(&ChatTurn::user("hi"), 30, 3);
        assert!(user_text.contains("user"));

        let assistant_text = render_to_text(&ChatTurn::assistant("hi"), 30, 3);
        assert!(assistant_text.contains("assistant"));
    }

    #[test]
    fn roles_use_distinct_accents() {
        let p = palette(Theme::Dark);
        let user_turn = ChatTurn::user("hi");
        let assistant_turn = ChatTurn::assistant("hi");
        let user = Message::new(&user_turn, &p);
        let assistant = Message::new(&assistant_turn, &p);
        assert_ne!(user.accent(), assistant.accent());
    }
}
