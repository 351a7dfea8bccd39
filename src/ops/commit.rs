use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::model::board::{Board, Column};
use crate::ops::drag::{DragSession, SubjectType};
use crate::ops::reorder::{self, ReorderError};

/// Error type for commits. Whatever the variant, the board a failed commit was
/// applied to stays the current one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("reorder failed: {0}")]
    Reorder(#[from] ReorderError),
    #[error("invalid drop target: {0}")]
    InvalidDropTarget(String),
    #[error("identity invariant violated: {0}")]
    IdentityInvariantViolation(String),
}

/// Which of the three commit shapes a session resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitKind {
    ColumnReorder,
    ItemReorder,
    ItemMove,
}

impl CommitKind {
    pub fn of(session: &DragSession) -> Self {
        match session.subject_type {
            SubjectType::Column => CommitKind::ColumnReorder,
            SubjectType::Item if session.is_same_container() => CommitKind::ItemReorder,
            SubjectType::Item => CommitKind::ItemMove,
        }
    }
}

/// Apply a completed drag session to `board`.
///
/// No-op sessions (no destination, or dropped where they started) return the
/// input `Arc` itself. Otherwise the result shares every column and item the
/// move did not touch.
pub fn commit(board: &Arc<Board>, session: &DragSession) -> Result<Arc<Board>, CommitError> {
    let Some(dst) = session.destination_index else {
        debug!("commit skipped, no destination");
        return Ok(Arc::clone(board));
    };
    if session.is_noop() {
        debug!(index = dst, "commit skipped, dropped in place");
        return Ok(Arc::clone(board));
    }

    let kind = CommitKind::of(session);
    let next = match kind {
        CommitKind::ColumnReorder => board.move_index(session.source_index, dst)?,
        CommitKind::ItemReorder => {
            let column = container(board, session.source_container_id.as_deref())?;
            let items = reorder::move_index(&column.items, session.source_index, dst)?;
            board.with_replaced([Arc::new(column.with_items(items))])
        }
        CommitKind::ItemMove => {
            let source = container(board, session.source_container_id.as_deref())?;
            let target = container(board, session.destination_container_id.as_deref())?;
            let (remaining, item) = reorder::remove_index(&source.items, session.source_index)?;
            let received = reorder::insert_index(&target.items, dst, item)?;
            board.with_replaced([
                Arc::new(source.with_items(remaining)),
                Arc::new(target.with_items(received)),
            ])
        }
    };

    verify(board, &next)?;
    info!(
        ?kind,
        from = session.source_index,
        to = dst,
        source = ?session.source_container_id,
        destination = ?session.destination_container_id,
        "commit applied"
    );
    Ok(Arc::new(next))
}

/// Post-commit identity checks: the order is a permutation of the column
/// keys, and no item was created or lost.
pub fn verify(before: &Board, after: &Board) -> Result<(), CommitError> {
    if !after.is_permutation() {
        return Err(CommitError::IdentityInvariantViolation(format!(
            "column order {:?} is not a permutation of {} columns",
            after.order(),
            after.entries().len()
        )));
    }
    let (was, now) = (before.total_items(), after.total_items());
    if was != now {
        return Err(CommitError::IdentityInvariantViolation(format!(
            "item count changed from {} to {}",
            was, now
        )));
    }
    Ok(())
}

fn container<'a>(board: &'a Board, id: Option<&str>) -> Result<&'a Arc<Column>, CommitError> {
    let id = id.ok_or_else(|| CommitError::InvalidDropTarget("item drag without a column".into()))?;
    board
        .get(id)
        .ok_or_else(|| CommitError::InvalidDropTarget(format!("no column {}", id)))
}
