//! Screen layout: title bar on top, scrollable conversation in the
//! middle, input box at the bottom. The input grows with its draft, so
//! its height is measured before the layout is split.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputBox, MessageList, TitleBar};
use crate::tui::theme::palette;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let colors = palette(app.theme);

    // Themed background across the whole screen.
    frame.render_widget(
        Block::new().style(Style::default().bg(colors.background).fg(colors.text)),
        frame.area(),
    );

    let input_height = InputBox::calculate_height(&app.draft, frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    TitleBar::new(&app.status_message, app.theme, &colors).render(frame, title_area);

    MessageList::new(
        &mut tui.message_list,
        &app.conversation,
        &colors,
        app.is_loading,
        spinner_frame,
    )
    .render(frame, main_area);

    InputBox::new(&app.draft, app.is_loading, &colors).render(frame, input_area);
}
