pub mod board_view;
pub mod clone_overlay;
pub mod help_overlay;
pub mod rows;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: board | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    board_view::render_board_view(frame, app, chunks[0]);

    // The dragged clone floats above the board, outside the row flow
    if app.session().is_some() {
        clone_overlay::render_clone_overlay(frame, app, chunks[0]);
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[1]);
}

/// Clip a row that starts `offset` cells into a viewport of `extent` cells at
/// `origin`. Returns the on-screen start and length, or None when no cell of
/// the row is inside.
fn clip_span(origin: u16, extent: u16, offset: isize, len: usize) -> Option<(u16, u16)> {
    let start = offset.max(0);
    let end = offset.saturating_add(len as isize).min(extent as isize);
    if end <= start {
        return None;
    }
    Some((origin + start as u16, (end - start) as u16))
}
