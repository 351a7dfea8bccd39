use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::board::{Board, BoardSnapshot};
use crate::model::config::SeedConfig;
use crate::ops::seed;

/// Error type for seed loading
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid board JSON {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid board: {0}")]
    Invalid(String),
}

/// Check what every board must satisfy before it becomes current: the column
/// order is a permutation of the column keys, column ids match their keys, and
/// no item id appears twice.
pub fn validate(board: &Board) -> Result<(), SeedError> {
    if !board.is_permutation() {
        return Err(SeedError::Invalid(format!(
            "columnOrder lists {} ids for {} columns, or repeats/misses one",
            board.order().len(),
            board.entries().len()
        )));
    }
    for (key, column) in board.entries() {
        if key != &column.id {
            return Err(SeedError::Invalid(format!(
                "column stored under {} has id {}",
                key, column.id
            )));
        }
    }
    let mut seen = HashSet::new();
    for item in board.entries().values().flat_map(|c| c.items.iter()) {
        if !seen.insert(item.id.as_str()) {
            return Err(SeedError::Invalid(format!("item {} appears twice", item.id)));
        }
    }
    Ok(())
}

/// Parse a board from `{ columns, columnOrder }` JSON and validate it.
pub fn parse_board(text: &str, path: &Path) -> Result<Board, SeedError> {
    let snapshot: BoardSnapshot =
        serde_json::from_str(text).map_err(|source| SeedError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
    let board = snapshot.into_board();
    validate(&board)?;
    Ok(board)
}

pub fn read_board(path: &Path) -> Result<Board, SeedError> {
    let text = fs::read_to_string(path).map_err(|source| SeedError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_board(&text, path)
}

/// The startup board: the configured JSON file if any, else a generated one.
pub fn seed_board(config: &SeedConfig) -> Result<Board, SeedError> {
    let board = match &config.board {
        Some(path) => read_board(path)?,
        None => seed::generate(config.columns, config.items_per_column),
    };
    tracing::info!(
        columns = board.len(),
        items = board.total_items(),
        "seed board loaded"
    );
    Ok(board)
}
