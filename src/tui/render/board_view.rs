use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::ops::drag::SubjectType;
use crate::ops::scroll_sync::SlotHandle;
use crate::ops::window::WindowModel;
use crate::tui::app::{App, Focus};

use super::clip_span;
use super::rows::{ColumnRowRenderer, PlacedRow, RowGeometry, RowRenderer, draw_row};

/// Render the board: a horizontal window of columns, each with its own
/// vertical window of items.
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let board = Arc::clone(app.board());
    let session = app.session().cloned();
    let columns = app.column_window;

    let placeholder = session
        .as_ref()
        .is_some_and(|s| s.uses_placeholder_in(SubjectType::Column, None));
    let row_count = WindowModel::row_count(board.len(), placeholder);
    let viewport = area.width as usize;

    // Keep the focused column in view
    let scroll = columns.scroll_to_reveal(app.column_cursor, viewport, app.column_scroll);
    app.column_scroll = columns.clamp_scroll(row_count, viewport, scroll);
    let range = columns.compute(board.len(), placeholder, viewport, app.column_scroll);

    if range.is_empty() {
        app.scroll_guard.retain(|_| false);
        app.drag_anchor = None;
        let empty = Paragraph::new(" No columns")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    // Slots leaving the window are unmounted; coming back starts at the top
    let materialized = range.materialized();
    app.scroll_guard.retain(|h| materialized.contains(&h.0));
    for row in materialized.clone() {
        if let Some(column) = board.at(row) {
            app.scroll_guard.observe(SlotHandle(row), &column.id, row);
        }
    }

    let column_target = session
        .as_ref()
        .filter(|s| s.subject_type == SubjectType::Column)
        .and_then(|s| s.destination_index);

    let lifted = session
        .as_ref()
        .and_then(|s| s.lifted_index_in(SubjectType::Column, None));

    let mut renderer = ColumnRowRenderer {
        board: &board,
        session: session.as_ref(),
        item_window: app.item_window,
        guard: &mut app.scroll_guard,
        column_cursor: app.column_cursor,
        item_cursor: (app.focus == Focus::Item).then_some(app.item_cursor),
        anchor: None,
    };

    let mut placed = Vec::with_capacity(materialized.len());
    let mut anchor = None;
    for row in materialized {
        let row_area = clip_span(
            area.x,
            area.width,
            columns.row_offset(row, app.column_scroll),
            columns.row_extent(),
        )
        .map(|(x, w)| Rect::new(x, area.y, w, area.height))
        .unwrap_or_default();
        let geometry = RowGeometry {
            area: row_area,
            visible: range.is_visible(row),
        };
        if column_target == Some(row) && geometry.visible {
            anchor = Some(row_area);
        }
        let slot = WindowModel::slot(row, board.len(), lifted);
        placed.push(PlacedRow {
            area: row_area,
            row: renderer.render(row, slot.is_placeholder(), geometry),
        });
    }
    app.drag_anchor = anchor.or(renderer.anchor);

    for row in &placed {
        draw_row(frame, &app.theme, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::drag::DragEvent;
    use crate::tui::render::test_helpers::*;

    fn render(app: &mut App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_board_view(frame, app, area);
        })
    }

    #[test]
    fn only_columns_in_view_are_drawn() {
        let mut app = app_with_board(1000, 4);
        let output = render(&mut app);
        assert!(output.contains("0th column"));
        assert!(output.contains("1st column"));
        assert!(output.contains("2nd column"));
        assert!(!output.contains("3rd column"));
        assert!(!output.contains("999th column"));
        // Three visible columns plus two overscan slots
        assert_eq!(app.scroll_guard.len(), 5);
    }

    #[test]
    fn item_list_is_windowed() {
        let mut app = app_with_board(1, 20);
        let output = render(&mut app);
        assert!(output.contains("item 0"));
        assert!(output.contains("item 6"));
        assert!(!output.contains("item 9"));
    }

    #[test]
    fn focused_item_is_scrolled_into_view() {
        let mut app = app_with_board(1, 20);
        app.item_cursor = 15;
        let output = render(&mut app);
        assert!(output.contains("item 15"));
        assert!(output.contains("item 9"));
        assert!(!output.contains("item 8"));
        assert_eq!(app.scroll_guard.scroll_offset(SlotHandle(0)), 26);
    }

    #[test]
    fn scroll_survives_rerender_but_not_a_column_reorder() {
        let mut app = app_with_board(3, 20);
        app.item_cursor = 15;
        render(&mut app);
        render(&mut app);
        assert_eq!(app.scroll_guard.scroll_offset(SlotHandle(0)), 26);

        app.dispatch(DragEvent::Start {
            subject_type: SubjectType::Column,
            container_id: None,
            index: 0,
        });
        app.dispatch(DragEvent::End {
            container_id: None,
            index: Some(1),
        });
        render(&mut app);
        assert_eq!(app.scroll_guard.identity(SlotHandle(0)), Some("column-1"));
        assert_eq!(app.scroll_guard.scroll_offset(SlotHandle(0)), 0);
        assert_eq!(app.scroll_guard.scroll_offset(SlotHandle(1)), 0);
    }

    #[test]
    fn column_scroll_follows_the_cursor() {
        let mut app = app_with_board(10, 1);
        app.column_cursor = 5;
        let output = render(&mut app);
        assert!(output.contains("5th column"));
        assert!(!output.contains("0th column"));
        // Column 5 ends at 168; the 80-cell viewport ends there too
        assert_eq!(app.column_scroll, 88);
    }

    #[test]
    fn drop_target_sets_the_anchor() {
        let mut app = app_with_board(2, 2);
        app.dispatch(DragEvent::Start {
            subject_type: SubjectType::Item,
            container_id: Some("column-0".into()),
            index: 0,
        });
        app.dispatch(DragEvent::Update {
            container_id: Some("column-1".into()),
            index: Some(2),
        });
        app.column_cursor = 1;
        app.item_cursor = 2;
        let output = render(&mut app);
        // The lifted item leaves an empty slot behind
        assert!(!output.contains("item 0"));
        assert_eq!(app.drag_anchor, Some(Rect::new(29, 7, 26, 3)));
    }

    #[test]
    fn empty_board() {
        let mut app = app_with_board(0, 0);
        let output = render(&mut app);
        assert_eq!(output, " No columns");
        assert!(app.scroll_guard.is_empty());
    }
}
