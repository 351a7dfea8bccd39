//! Row renderers: what each window row of a container shows.
//!
//! A renderer answers for one logical row at a time and never sees the window
//! itself. The nested item list of a column is windowed inside
//! [`ColumnRowRenderer`], and only for columns that are actually on screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::model::board::{Board, Column};
use crate::ops::drag::{DragSession, SubjectType};
use crate::ops::scroll_sync::{ScrollSyncGuard, SlotHandle};
use crate::ops::window::{RowSlot, WindowModel};
use crate::tui::theme::Theme;
use crate::util::unicode::{fit_to_width, truncate_to_width};

use super::clip_span;

/// Where a row lands this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowGeometry {
    /// Screen area, clipped to the viewport. Empty for overscan rows.
    pub area: Rect,
    /// Whether the row intersects the viewport
    pub visible: bool,
}

/// What to draw for one window row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualRow {
    /// Nothing. An open placeholder slot
    Blank,
    /// The empty slot a lifted subject leaves behind
    Reserved,
    Item {
        id: String,
        text: String,
        focused: bool,
    },
    Column {
        title: String,
        count: usize,
        /// The cursor is somewhere in this column
        focused: bool,
        /// The cursor is on the header itself
        header_focused: bool,
        /// Item rows, empty unless the column is on screen
        items: Vec<PlacedRow>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedRow {
    pub area: Rect,
    pub row: VisualRow,
}

pub trait RowRenderer {
    fn render(&mut self, logical_index: usize, is_placeholder: bool, geometry: RowGeometry) -> VisualRow;
}

/// The slot a renderer answers for. The caller's placeholder flag wins over
/// the row position.
fn resolve_slot(logical_index: usize, is_placeholder: bool, logical_count: usize, lifted: Option<usize>) -> RowSlot {
    if is_placeholder {
        RowSlot::Placeholder
    } else {
        WindowModel::slot(logical_index, logical_count, lifted)
    }
}

/// Item cards of one column
pub struct ItemRowRenderer<'a> {
    pub column: &'a Column,
    /// Origin row of an item currently lifted out of this column
    pub lifted: Option<usize>,
    pub focused: Option<usize>,
}

impl RowRenderer for ItemRowRenderer<'_> {
    fn render(&mut self, logical_index: usize, is_placeholder: bool, _geometry: RowGeometry) -> VisualRow {
        let items = &self.column.items;
        match resolve_slot(logical_index, is_placeholder, items.len(), self.lifted) {
            RowSlot::Placeholder => VisualRow::Blank,
            RowSlot::Lifted(_) => VisualRow::Reserved,
            RowSlot::Entry(index) => match items.get(index) {
                Some(item) => VisualRow::Item {
                    id: item.id.clone(),
                    text: item.text.clone(),
                    focused: self.focused == Some(index),
                },
                None => VisualRow::Blank,
            },
        }
    }
}

/// Columns of the board, each hosting its own item window
pub struct ColumnRowRenderer<'a> {
    pub board: &'a Board,
    pub session: Option<&'a DragSession>,
    pub item_window: WindowModel,
    pub guard: &'a mut ScrollSyncGuard,
    pub column_cursor: usize,
    /// Item row to keep in view in the focused column; None on the header
    pub item_cursor: Option<usize>,
    /// Screen area of the item drop target, when one was rendered
    pub anchor: Option<Rect>,
}

impl ColumnRowRenderer<'_> {
    fn item_rows(&mut self, slot: usize, column: &Column, area: Rect) -> Vec<PlacedRow> {
        let inner = Block::bordered().inner(area);
        let viewport = inner.height as usize;
        let handle = SlotHandle(slot);
        let focused = slot == self.column_cursor;

        let placeholder = self
            .session
            .is_some_and(|s| s.uses_placeholder_in(SubjectType::Item, Some(column.id.as_str())));
        let row_count = WindowModel::row_count(column.items.len(), placeholder);

        let mut offset = self.guard.scroll_offset(handle);
        if focused && let Some(row) = self.item_cursor {
            offset = self.item_window.scroll_to_reveal(row, viewport, offset);
        }
        offset = self.item_window.clamp_scroll(row_count, viewport, offset);
        self.guard.set_scroll_offset(handle, offset);

        let range = self
            .item_window
            .compute(column.items.len(), placeholder, viewport, offset);
        let target = self.session.and_then(|s| {
            (s.subject_type == SubjectType::Item
                && s.destination_container_id.as_deref() == Some(column.id.as_str()))
            .then_some(s.destination_index)
            .flatten()
        });

        let mut renderer = ItemRowRenderer {
            column,
            lifted: self
                .session
                .and_then(|s| s.lifted_index_in(SubjectType::Item, Some(column.id.as_str()))),
            focused: if focused { self.item_cursor } else { None },
        };

        let mut rows = Vec::with_capacity(range.materialized().len());
        for row in range.materialized() {
            let area = clip_span(
                inner.y,
                inner.height,
                self.item_window.row_offset(row, offset),
                self.item_window.row_extent(),
            )
            .map(|(y, h)| Rect::new(inner.x, y, inner.width, h))
            .unwrap_or_default();
            let geometry = RowGeometry {
                area,
                visible: range.is_visible(row),
            };
            if target == Some(row) && geometry.visible {
                self.anchor = Some(area);
            }
            let slot = WindowModel::slot(row, column.items.len(), renderer.lifted);
            rows.push(PlacedRow {
                area,
                row: renderer.render(row, slot.is_placeholder(), geometry),
            });
        }
        rows
    }
}

impl RowRenderer for ColumnRowRenderer<'_> {
    fn render(&mut self, logical_index: usize, is_placeholder: bool, geometry: RowGeometry) -> VisualRow {
        let board = self.board;
        let lifted = self
            .session
            .and_then(|s| s.lifted_index_in(SubjectType::Column, None));
        let index = match resolve_slot(logical_index, is_placeholder, board.len(), lifted) {
            RowSlot::Placeholder => return VisualRow::Blank,
            RowSlot::Lifted(_) => return VisualRow::Reserved,
            RowSlot::Entry(index) => index,
        };
        let Some(column) = board.at(index) else {
            return VisualRow::Blank;
        };

        let items = if geometry.visible {
            self.item_rows(logical_index, column, geometry.area)
        } else {
            Vec::new()
        };
        let focused = logical_index == self.column_cursor;
        VisualRow::Column {
            title: column.title.clone(),
            count: column.items.len(),
            focused,
            header_focused: focused && self.item_cursor.is_none(),
            items,
        }
    }
}

/// Draw a placed row and, for columns, its item rows.
pub fn draw_row(frame: &mut Frame, theme: &Theme, placed: &PlacedRow) {
    let area = placed.area;
    if area.width == 0 || area.height == 0 {
        return;
    }
    let bg = theme.background;

    match &placed.row {
        VisualRow::Blank => {}
        VisualRow::Reserved => {
            let block = Block::bordered().border_style(Style::default().fg(theme.reserved).bg(bg));
            frame.render_widget(block, area);
        }
        VisualRow::Item { id, text, focused } => {
            let (border, text_style) = if *focused {
                (
                    theme.highlight,
                    Style::default()
                        .fg(theme.text_bright)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (theme.border, Style::default().fg(theme.text).bg(bg))
            };
            let inner_width = area.width.saturating_sub(2) as usize;
            let block = Block::bordered()
                .border_style(Style::default().fg(border).bg(bg))
                .title(Span::styled(
                    truncate_to_width(id, inner_width),
                    Style::default().fg(theme.dim).bg(bg),
                ));
            let paragraph = Paragraph::new(Line::from(Span::styled(
                truncate_to_width(text, inner_width),
                text_style,
            )))
            .block(block)
            .style(Style::default().bg(bg));
            frame.render_widget(paragraph, area);
        }
        VisualRow::Column {
            title,
            count,
            focused,
            header_focused,
            items,
        } => {
            let border = if *focused { theme.highlight } else { theme.border };
            let title_style = if *header_focused {
                Style::default()
                    .fg(theme.text_bright)
                    .bg(theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_bright).bg(bg)
            };
            let inner_width = area.width.saturating_sub(2) as usize;
            let count_label = format!(" {}", count);
            let title_width = inner_width.saturating_sub(count_label.len());
            // Count sits against the right border
            let block = Block::bordered()
                .border_style(Style::default().fg(border).bg(bg))
                .title(Line::from(vec![
                    Span::styled(fit_to_width(title, title_width), title_style),
                    Span::styled(count_label, Style::default().fg(theme.dim).bg(bg)),
                ]))
                .style(Style::default().bg(bg));
            frame.render_widget(block, area);

            for child in items {
                draw_row(frame, theme, child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::seed;
    use pretty_assertions::assert_eq;

    #[test]
    fn item_renderer_variants() {
        let board = seed::generate(1, 3);
        let column = board.at(0).unwrap();
        let mut renderer = ItemRowRenderer {
            column,
            lifted: Some(1),
            focused: Some(2),
        };
        let g = RowGeometry::default();
        assert_eq!(
            renderer.render(0, false, g),
            VisualRow::Item {
                id: "id:0".into(),
                text: "item 0".into(),
                focused: false,
            }
        );
        assert_eq!(renderer.render(1, false, g), VisualRow::Reserved);
        assert!(matches!(
            renderer.render(2, false, g),
            VisualRow::Item { focused: true, .. }
        ));
        assert_eq!(renderer.render(3, true, g), VisualRow::Blank);
        // Past the last item is the trailing slot even without the flag
        assert_eq!(renderer.render(3, false, g), VisualRow::Blank);
        // The flag wins over an in-range position
        assert_eq!(renderer.render(0, true, g), VisualRow::Blank);
    }

    fn column_renderer<'a>(
        board: &'a Board,
        session: Option<&'a DragSession>,
        guard: &'a mut ScrollSyncGuard,
    ) -> ColumnRowRenderer<'a> {
        ColumnRowRenderer {
            board,
            session,
            item_window: WindowModel::new(3, 1),
            guard,
            column_cursor: 0,
            item_cursor: Some(0),
            anchor: None,
        }
    }

    #[test]
    fn hidden_column_builds_no_item_window() {
        let board = seed::generate(2, 10);
        let mut guard = ScrollSyncGuard::new();
        let mut renderer = column_renderer(&board, None, &mut guard);

        let VisualRow::Column { items, .. } = renderer.render(1, false, RowGeometry::default()) else {
            panic!("expected a column row");
        };
        assert!(items.is_empty());
    }

    #[test]
    fn visible_column_windows_its_items() {
        let board = seed::generate(1, 10);
        let mut guard = ScrollSyncGuard::new();
        let mut renderer = column_renderer(&board, None, &mut guard);
        let geometry = RowGeometry {
            area: Rect::new(0, 0, 20, 11),
            visible: true,
        };

        let VisualRow::Column {
            items,
            count,
            header_focused,
            ..
        } = renderer.render(0, false, geometry)
        else {
            panic!("expected a column row");
        };
        assert_eq!(count, 10);
        assert!(!header_focused);
        // Inner height 9 shows rows 0..=2, plus one overscan row
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].area, Rect::new(1, 1, 18, 3));
        assert_eq!(items[3].area, Rect::default());
    }

    #[test]
    fn lifted_column_is_reserved_and_placeholder_is_blank() {
        let board = seed::generate(3, 1);
        let session = DragSession::begin(SubjectType::Column, None, 1);
        let mut guard = ScrollSyncGuard::new();
        let mut renderer = column_renderer(&board, Some(&session), &mut guard);
        let g = RowGeometry::default();
        assert_eq!(renderer.render(1, false, g), VisualRow::Reserved);
        assert_eq!(renderer.render(3, true, g), VisualRow::Blank);
    }

    #[test]
    fn foreign_drop_target_gets_a_placeholder_row_and_anchor() {
        let board = seed::generate(2, 2);
        let session = DragSession::begin(SubjectType::Item, Some("column-0".into()), 0)
            .retarget(Some("column-1".into()), Some(2));
        let mut guard = ScrollSyncGuard::new();
        let mut renderer = column_renderer(&board, Some(&session), &mut guard);
        renderer.column_cursor = 1;
        renderer.item_cursor = Some(2);
        let geometry = RowGeometry {
            area: Rect::new(20, 0, 20, 20),
            visible: true,
        };

        let VisualRow::Column { items, .. } = renderer.render(1, false, geometry) else {
            panic!("expected a column row");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].row, VisualRow::Blank);
        assert_eq!(renderer.anchor, Some(Rect::new(21, 7, 18, 3)));
    }
}
