//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the turn list (plus the typing indicator while loading)
//! - Manage scrolling logic (stick-to-bottom, re-pin, clamping)
//! - Cache turn heights so layout is incremental
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the conversation
//! (props). Since `Component::render` takes `&mut self`, the state
//! (layout cache and scroll position) can be updated during the render
//! pass, aligning with Ratatui's `StatefulWidget` pattern.
//!
//! Turns are immutable once appended and there is no streaming, so cached
//! heights stay valid for the lifetime of a width; the cache only
//! invalidates when the terminal is resized.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::Conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Rows occupied by the typing indicator bubble while a request is in flight.
const INDICATOR_HEIGHT: u16 = 3;
/// Width of the typing indicator bubble.
const INDICATOR_WIDTH: u16 = 11;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the canvas bounds.
    /// Prevents overscrolling past the last turn.
    pub fn clamp_scroll(&mut self, canvas_height: u16) {
        let max_y = canvas_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the
    /// bottom. Called on scroll-down events so that scrolling past the end
    /// re-pins to bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let total_content_height: u16 = self.layout.heights.iter().sum();
        let max_y = total_content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// EventHandler lives on `MessageListState` rather than `MessageList`:
/// scrolling needs persistent state, and the transient component is
/// recreated each frame with fresh props.
impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally, nothing to emit

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    // Mutable reference to persistent state
    pub state: &'a mut MessageListState,
    pub conversation: &'a Conversation,
    pub palette: &'a Palette,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        conversation: &'a Conversation,
        palette: &'a Palette,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            conversation,
            palette,
            is_loading,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let turns = self.conversation.turns();

        // 1. Update layout cache: keep reusable heights, measure the rest.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(turns.len(), content_width);
        layout.heights.truncate(reusable);
        for turn in turns.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(turn, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(content_width);

        let total_height: u16 = self.state.layout.heights.iter().sum();
        let canvas_height = if self.is_loading {
            total_height + INDICATOR_HEIGHT
        } else {
            total_height
        };

        // 2. Clamp scroll offset to prevent overscrolling past content.
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll(canvas_height);
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self
            .state
            .layout
            .visible_range(scroll_offset, area.height);

        // 3. Render visible turns into a ScrollView.
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let turn_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&turns[i], self.palette), turn_rect);
            y_offset += height;
        }

        // 4. Typing indicator sits below the last turn while loading.
        if self.is_loading {
            let indicator_rect = Rect::new(
                0,
                total_height,
                INDICATOR_WIDTH.min(content_width),
                INDICATOR_HEIGHT,
            );
            let indicator = TypingIndicator {
                palette: self.palette,
                spinner_frame: self.spinner_frame,
            };
            scroll_view.render_widget(indicator, indicator_rect);
        }

        // Auto-scroll (mutation)
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Three pulsing dots shown while the assistant is "typing".
/// The active dot cycles with the animation frame.
struct TypingIndicator<'a> {
    palette: &'a Palette,
    spinner_frame: usize,
}

impl<'a> Widget for TypingIndicator<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let dim = Style::default().fg(self.palette.dim);
        let bright = Style::default()
            .fg(self.palette.assistant_accent)
            .add_modifier(Modifier::BOLD);

        let active = self.spinner_frame % 3;
        let spans: Vec<Span> = (0..3)
            .flat_map(|i| {
                let style = if i == active { bright } else { dim };
                [Span::styled("●", style), Span::raw(" ")]
            })
            .collect();

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(dim);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(spans))
            .centered()
            .render(inner, buf);
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    ///
    /// Turns never change once appended, so a cached height is only stale
    /// when the width changed. A shrinking turn count cannot happen with an
    /// append-only conversation, but is treated as a full invalidation
    /// anyway.
    pub fn reusable_count(&self, turn_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || turn_count < self.heights.len() {
            return 0;
        }
        self.heights.len()
    }

    pub fn update_metadata(&mut self, content_width: u16) {
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    /// Which turns can appear within the viewport (with half a viewport of
    /// overdraw on each side so partial scrolls stay smooth).
    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_cache_reuse() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(80);

        // Same width: everything reusable
        assert_eq!(cache.reusable_count(5, 80), 5);

        // New turn appended: existing heights still valid
        assert_eq!(cache.reusable_count(6, 80), 5);

        // Width changed: full invalidation
        assert_eq!(cache.reusable_count(5, 40), 0);

        // Fewer turns than cached: full invalidation (defensive)
        assert_eq!(cache.reusable_count(3, 80), 0);
    }

    #[test]
    fn test_prefix_heights() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 5, 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![3, 8, 12]);
    }

    #[test]
    fn test_visible_range_windows_content() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 10]; // 40 rows of content
        cache.rebuild_prefix_heights();

        // Top of the list: early turns visible, tail excluded
        let top = cache.visible_range(0, 10);
        assert_eq!(top.start, 0);
        assert!(top.end < 10);

        // Bottom of the list: tail visible, head excluded
        let bottom = cache.visible_range(30, 10);
        assert!(bottom.start > 0);
        assert_eq!(bottom.end, 10);
    }

    #[test]
    fn test_scroll_up_unsticks() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_to_bottom_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_repins_at_bottom() {
        let mut state = MessageListState::new();
        state.layout.heights = vec![5, 5];
        state.viewport_height = 10;
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        // All content fits in the viewport, so any scroll down re-pins.
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_clamp_scroll_limits_offset() {
        let mut state = MessageListState::new();
        state.viewport_height = 10;
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 100 });
        state.clamp_scroll(30);
        assert_eq!(state.scroll_state.offset().y, 20);
    }
}
