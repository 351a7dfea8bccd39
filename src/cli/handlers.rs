use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::seed_io;
use crate::model::board::Board;
use crate::model::config::Config;
use crate::ops::commit::CommitKind;
use crate::ops::drag::{DragEvent, SubjectType};
use crate::ops::store::{BoardStore, Outcome};
use crate::ops::window::WindowModel;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command {
        None => crate::tui::run(config),
        Some(cmd) => match cmd {
            Commands::Check => cmd_check(config, json),
            Commands::Show(args) => cmd_show(args, config, json),
            Commands::Window(args) => cmd_window(args, config, json),
            Commands::Drag(args) => cmd_drag(args, config, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_check(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match seed_io::seed_board(&config.seed).and_then(|board| {
        seed_io::validate(&board)?;
        Ok(board)
    }) {
        Ok(board) => {
            if json {
                let result = CheckJson {
                    valid: true,
                    columns: board.len(),
                    items: board.total_items(),
                    error: None,
                };
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "ok: {} columns, {} items",
                    board.len(),
                    board.total_items()
                );
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let result = CheckJson {
                    valid: false,
                    columns: 0,
                    items: 0,
                    error: Some(e.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Err(e.into())
        }
    }
}

fn cmd_show(args: ShowArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = seed_io::seed_board(&config.seed)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&board_to_json(&board, args.limit))?
        );
    } else {
        for line in format_board(&board, args.limit) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_window(args: WindowArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let model = WindowModel::new(
        args.row_extent.unwrap_or(config.window.item_height),
        args.overscan.unwrap_or(config.window.overscan),
    );
    let range = model.compute(args.count, args.placeholder, args.viewport, args.offset);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&window_to_json(range, args.count))?
        );
    } else {
        for line in format_window(&range, args.count) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Drag
// ---------------------------------------------------------------------------

/// Start, hover and drop events for one gesture.
fn gesture(action: &DragAction) -> [DragEvent; 3] {
    match action {
        DragAction::Column(args) => [
            DragEvent::Start {
                subject_type: SubjectType::Column,
                container_id: None,
                index: args.src,
            },
            DragEvent::Update {
                container_id: None,
                index: Some(args.dst),
            },
            DragEvent::End {
                container_id: None,
                index: Some(args.dst),
            },
        ],
        DragAction::Item(args) => [
            DragEvent::Start {
                subject_type: SubjectType::Item,
                container_id: Some(args.src_col.clone()),
                index: args.src_idx,
            },
            DragEvent::Update {
                container_id: Some(args.dst_col.clone()),
                index: Some(args.dst_idx),
            },
            DragEvent::End {
                container_id: Some(args.dst_col.clone()),
                index: Some(args.dst_idx),
            },
        ],
    }
}

/// Run a full gesture through a fresh store and report the final outcome.
pub fn run_gesture(board: Board, action: &DragAction) -> Result<(BoardStore, Outcome), Box<dyn std::error::Error>> {
    let mut store = BoardStore::new(board);
    let mut outcome = Outcome::Ignored;
    for event in gesture(action) {
        outcome = store.dispatch(event)?;
    }
    Ok((store, outcome))
}

fn cmd_drag(args: DragCmd, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = seed_io::seed_board(&config.seed)?;
    let (store, outcome) = run_gesture(board, &args.action)?;

    let (session, error) = match &outcome {
        Outcome::Committed(s) | Outcome::Unchanged(s) | Outcome::Cancelled(s) => (s.clone(), None),
        Outcome::Aborted { session, error } => (session.clone(), Some(error.to_string())),
        Outcome::Ignored | Outcome::Dragging => {
            return Err("gesture did not finish".into());
        }
    };

    if json {
        let result = DragJson {
            outcome: outcome_label(&outcome),
            kind: matches!(outcome, Outcome::Committed(_)).then(|| CommitKind::of(&session)),
            session,
            error,
            board: board_to_json(store.board(), None),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", outcome_label(&outcome));
    if let Some(error) = &error {
        eprintln!("warning: {}", error);
    }
    for line in format_board(store.board(), None) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::{Column, Item};
    use pretty_assertions::assert_eq;

    fn board() -> Board {
        Board::from_values([
            Column::new("A", "A", vec![Item::new("i0", "0"), Item::new("i1", "1")]),
            Column::new("B", "B", vec![Item::new("i2", "2")]),
            Column::new("C", "C", vec![]),
        ])
    }

    fn ids(board: &Board, column: &str) -> Vec<String> {
        board
            .get(column)
            .unwrap()
            .items
            .iter()
            .map(|i| i.id.clone())
            .collect()
    }

    #[test]
    fn column_gesture_commits() {
        let action = DragAction::Column(DragColumnArgs { src: 2, dst: 0 });
        let (store, outcome) = run_gesture(board(), &action).unwrap();
        assert!(matches!(outcome, Outcome::Committed(_)));
        assert_eq!(store.board().order(), &["C", "A", "B"]);
        assert!(!store.drag().is_dragging());
    }

    #[test]
    fn item_gesture_moves_across_columns() {
        let action = DragAction::Item(DragItemArgs {
            src_col: "A".into(),
            src_idx: 0,
            dst_col: "B".into(),
            dst_idx: 1,
        });
        let (store, outcome) = run_gesture(board(), &action).unwrap();
        assert!(matches!(outcome, Outcome::Committed(_)));
        assert_eq!(ids(store.board(), "A"), vec!["i1"]);
        assert_eq!(ids(store.board(), "B"), vec!["i2", "i0"]);
    }

    #[test]
    fn unknown_destination_column_cancels() {
        let action = DragAction::Item(DragItemArgs {
            src_col: "A".into(),
            src_idx: 0,
            dst_col: "nowhere".into(),
            dst_idx: 0,
        });
        let (store, outcome) = run_gesture(board(), &action).unwrap();
        assert!(matches!(outcome, Outcome::Cancelled(_)));
        assert_eq!(ids(store.board(), "A"), vec!["i0", "i1"]);
    }

    #[test]
    fn out_of_range_destination_aborts() {
        let action = DragAction::Column(DragColumnArgs { src: 0, dst: 9 });
        let (store, outcome) = run_gesture(board(), &action).unwrap();
        assert!(matches!(outcome, Outcome::Aborted { .. }));
        assert_eq!(store.board().order(), &["A", "B", "C"]);
    }
}
