use serde::Serialize;

use crate::model::board::{Board, Column};
use crate::ops::commit::CommitKind;
use crate::ops::drag::DragSession;
use crate::ops::store::Outcome;
use crate::ops::window::WindowRange;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub id: String,
    pub title: String,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub columns: Vec<ColumnJson>,
    pub total_columns: usize,
    pub total_items: usize,
}

#[derive(Serialize)]
pub struct CheckJson {
    pub valid: bool,
    pub columns: usize,
    pub items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct DragJson {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CommitKind>,
    pub session: DragSession,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub board: BoardJson,
}

#[derive(Serialize)]
pub struct WindowJson {
    #[serde(flatten)]
    pub range: WindowRange,
    pub visible: Vec<usize>,
    pub materialized: Vec<usize>,
    pub placeholder_row: Option<usize>,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn column_to_json(column: &Column) -> ColumnJson {
    ColumnJson {
        id: column.id.clone(),
        title: column.title.clone(),
        items: column
            .items
            .iter()
            .map(|item| ItemJson {
                id: item.id.clone(),
                text: item.text.clone(),
            })
            .collect(),
    }
}

/// Board in column order, optionally cut to the first `limit` columns.
pub fn board_to_json(board: &Board, limit: Option<usize>) -> BoardJson {
    BoardJson {
        columns: board
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|c| column_to_json(c))
            .collect(),
        total_columns: board.len(),
        total_items: board.total_items(),
    }
}

pub fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Ignored => "ignored",
        Outcome::Dragging => "dragging",
        Outcome::Committed(_) => "committed",
        Outcome::Unchanged(_) => "unchanged",
        Outcome::Cancelled(_) => "cancelled",
        Outcome::Aborted { .. } => "aborted",
    }
}

pub fn window_to_json(range: WindowRange, logical_count: usize) -> WindowJson {
    WindowJson {
        range,
        visible: range.visible().collect(),
        materialized: range.materialized().collect(),
        placeholder_row: (range.row_count > logical_count).then_some(logical_count),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Column header followed by one indented line per item.
pub fn format_column(index: usize, column: &Column) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>3}  {} [{}] ({} items)",
        index,
        column.title,
        column.id,
        column.items.len()
    )];
    for item in &column.items {
        lines.push(format!("       {:<10} {}", item.id, item.text));
    }
    lines
}

pub fn format_board(board: &Board, limit: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, column) in board.iter().enumerate().take(limit.unwrap_or(usize::MAX)) {
        lines.extend(format_column(i, column));
    }
    let shown = limit.map_or(board.len(), |l| l.min(board.len()));
    if shown < board.len() {
        lines.push(format!("  ... {} more columns", board.len() - shown));
    }
    lines
}

pub fn format_window(range: &WindowRange, logical_count: usize) -> Vec<String> {
    if range.is_empty() {
        return vec!["rows:        0 (nothing to render)".to_string()];
    }
    let mut lines = vec![
        format!("rows:        {}", range.row_count),
        format!(
            "visible:     {}..={}",
            range.first_visible_index, range.last_visible_index
        ),
        format!(
            "overscan:    {}..{}",
            range.overscan_start, range.overscan_end
        ),
    ];
    if range.row_count > logical_count {
        lines.push(format!("placeholder: {}", logical_count));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::Item;
    use crate::ops::window::WindowModel;
    use pretty_assertions::assert_eq;

    fn board() -> Board {
        Board::from_values([
            Column::new("todo", "To do", vec![Item::new("a", "first"), Item::new("b", "second")]),
            Column::new("done", "Done", vec![]),
        ])
    }

    #[test]
    fn format_board_lists_columns_and_items() {
        let lines = format_board(&board(), None);
        assert_eq!(
            lines,
            vec![
                "  0  To do [todo] (2 items)".to_string(),
                "       a          first".to_string(),
                "       b          second".to_string(),
                "  1  Done [done] (0 items)".to_string(),
            ]
        );
    }

    #[test]
    fn format_board_with_limit_mentions_the_rest() {
        let lines = format_board(&board(), Some(1));
        assert_eq!(lines.last().unwrap(), "  ... 1 more columns");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn board_json_keeps_column_order() {
        let json = serde_json::to_value(board_to_json(&board(), None)).unwrap();
        assert_eq!(json["columns"][0]["id"], "todo");
        assert_eq!(json["columns"][1]["id"], "done");
        assert_eq!(json["total_items"], 2);
    }

    #[test]
    fn window_text_and_json() {
        let range = WindowModel::new(3, 1).compute(4, true, 6, 0);
        let lines = format_window(&range, 4);
        assert_eq!(lines[0], "rows:        5");
        assert_eq!(lines[1], "visible:     0..=1");
        assert_eq!(lines[2], "overscan:    0..3");
        assert_eq!(lines[3], "placeholder: 4");

        let json = serde_json::to_value(window_to_json(range, 4)).unwrap();
        assert_eq!(json["row_count"], 5);
        assert_eq!(json["placeholder_row"], 4);
        assert_eq!(json["visible"], serde_json::json!([0, 1]));
    }

    #[test]
    fn empty_window_text() {
        let range = WindowModel::new(3, 1).compute(0, false, 6, 0);
        assert_eq!(format_window(&range, 0), vec!["rows:        0 (nothing to render)"]);
    }
}
