//! Keyboard gesture adapter: turns key presses into drag events.
//!
//! The candidate destination is the only "pointer" a keyboard has, so each
//! arrow press hit-tests one step away from it and sends an update.

use crossterm::event::{KeyCode, KeyEvent};

use crate::model::board::Board;
use crate::ops::drag::{DragEvent, DragSession, SubjectType};
use crate::tui::app::{App, Focus, Mode};

/// One keyboard step of the candidate destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Lift the subject under the cursor: the focused item, or the focused
/// column when the cursor is on its header.
pub(super) fn enter_drag_mode(app: &mut App) {
    let Some(column) = app.focused_column() else {
        return;
    };
    let event = match app.focus {
        Focus::Item if !column.items.is_empty() => DragEvent::Start {
            subject_type: SubjectType::Item,
            container_id: Some(column.id.clone()),
            index: app.item_cursor,
        },
        _ => DragEvent::Start {
            subject_type: SubjectType::Column,
            container_id: None,
            index: app.column_cursor,
        },
    };
    app.dispatch(event);
}

pub(super) fn handle_drag(app: &mut App, key: KeyEvent) {
    let direction = match key.code {
        KeyCode::Char('k') | KeyCode::Up => Direction::Up,
        KeyCode::Char('j') | KeyCode::Down => Direction::Down,
        KeyCode::Char('h') | KeyCode::Left => Direction::Left,
        KeyCode::Char('l') | KeyCode::Right => Direction::Right,
        KeyCode::Enter | KeyCode::Char('m') | KeyCode::Char(' ') => {
            drop_subject(app);
            return;
        }
        KeyCode::Esc => {
            app.dispatch(DragEvent::Cancel);
            return;
        }
        _ => return,
    };

    let Some(session) = app.session() else {
        app.mode = Mode::Navigate;
        return;
    };
    let subject_type = session.subject_type;
    let (container_id, index) = drop_target(app.board(), session, direction);
    if let Some(index) = index {
        app.place_cursor(subject_type, container_id.as_deref(), index);
    }
    app.dispatch(DragEvent::Update {
        container_id,
        index,
    });
}

fn drop_subject(app: &mut App) {
    let Some(session) = app.session() else {
        app.mode = Mode::Navigate;
        return;
    };
    let event = DragEvent::End {
        container_id: session.destination_container_id.clone(),
        index: session.destination_index,
    };
    app.dispatch(event);
}

/// Hit-test one step from the current candidate destination.
///
/// Columns move along the column order. Items move within a column with
/// up/down and across columns with left/right, keeping their index when it
/// fits. A foreign column accepts one slot past its last item; the origin
/// column does not, since the subject already occupies one of its slots.
pub fn drop_target(
    board: &Board,
    session: &DragSession,
    direction: Direction,
) -> (Option<String>, Option<usize>) {
    let current = session.destination_index.unwrap_or(session.source_index);
    match session.subject_type {
        SubjectType::Column => {
            let last = board.len().saturating_sub(1);
            let next = match direction {
                Direction::Left | Direction::Up => current.saturating_sub(1),
                Direction::Right | Direction::Down => (current + 1).min(last),
            };
            (None, Some(next))
        }
        SubjectType::Item => {
            let hovered = session
                .destination_container_id
                .as_deref()
                .or(session.source_container_id.as_deref());
            let Some(position) = hovered.and_then(|id| board.position(id)) else {
                return (None, None);
            };
            let (position, index) = match direction {
                Direction::Up => (position, current.saturating_sub(1)),
                Direction::Down => (position, current + 1),
                Direction::Left => (position.saturating_sub(1), current),
                Direction::Right => ((position + 1).min(board.len() - 1), current),
            };
            let Some(column) = board.at(position) else {
                return (None, None);
            };
            let last_slot = if session.source_container_id.as_deref() == Some(column.id.as_str()) {
                column.items.len().saturating_sub(1)
            } else {
                column.items.len()
            };
            (Some(column.id.clone()), Some(index.min(last_slot)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::{Column, Item};

    fn board() -> Board {
        Board::from_values([
            Column::new("A", "A", vec![Item::new("a0", "0"), Item::new("a1", "1"), Item::new("a2", "2")]),
            Column::new("B", "B", vec![Item::new("b0", "0")]),
            Column::new("C", "C", vec![]),
        ])
    }

    fn item_session(col: &str, index: usize) -> DragSession {
        DragSession::begin(SubjectType::Item, Some(col.into()), index)
    }

    #[test]
    fn column_target_stays_in_range() {
        let board = board();
        let session = DragSession::begin(SubjectType::Column, None, 0);
        assert_eq!(drop_target(&board, &session, Direction::Left), (None, Some(0)));
        assert_eq!(drop_target(&board, &session, Direction::Right), (None, Some(1)));
        let at_end = session.retarget(None, Some(2));
        assert_eq!(drop_target(&board, &at_end, Direction::Right), (None, Some(2)));
    }

    #[test]
    fn item_target_clamps_index_to_the_column() {
        let board = board();
        // From A@2 to B: B has one item, so the append slot is 1
        let session = item_session("A", 2);
        assert_eq!(
            drop_target(&board, &session, Direction::Right),
            (Some("B".to_string()), Some(1))
        );
        // Empty foreign column accepts index 0
        let over_b = session.retarget(Some("B".into()), Some(1));
        assert_eq!(
            drop_target(&board, &over_b, Direction::Right),
            (Some("C".to_string()), Some(0))
        );
    }

    #[test]
    fn origin_column_has_no_append_slot() {
        let board = board();
        let session = item_session("A", 2);
        assert_eq!(
            drop_target(&board, &session, Direction::Down),
            (Some("A".to_string()), Some(2))
        );
        // Coming back from B at index 1 lands inside A
        let over_b = session.retarget(Some("B".into()), Some(1));
        assert_eq!(
            drop_target(&board, &over_b, Direction::Left),
            (Some("A".to_string()), Some(1))
        );
    }

    #[test]
    fn dead_target_yields_no_destination() {
        let board = board();
        let session = item_session("gone", 0);
        assert_eq!(drop_target(&board, &session, Direction::Down), (None, None));
    }
}
