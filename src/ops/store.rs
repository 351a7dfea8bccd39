//! The single reducer between gesture messages and the board.
//!
//! `BoardStore` holds the current board snapshot and the drag machine. Every
//! gesture event goes through [`BoardStore::dispatch`]; a completed drag is
//! committed synchronously inside the same call, so no caller ever sees a
//! half-applied move.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::model::board::Board;
use crate::ops::commit::{self, CommitError};
use crate::ops::drag::{DragError, DragEvent, DragSession, DragState, Effect, SubjectType};

/// What a dispatched event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event landed while no drag was active
    Ignored,
    /// The session started or moved
    Dragging,
    /// A new board is current
    Committed(DragSession),
    /// The drop changed nothing; the board is the same snapshot
    Unchanged(DragSession),
    /// The gesture ended without a target, or was cancelled
    Cancelled(DragSession),
    /// The commit failed and the previous board was kept
    Aborted {
        session: DragSession,
        error: CommitError,
    },
}

#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Arc<Board>,
    drag: DragState,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        BoardStore {
            board: Arc::new(board),
            drag: DragState::Idle,
        }
    }

    /// The current snapshot. Cheap to clone; never mutated in place.
    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// Whether the window of `container` must reserve the placeholder slot.
    pub fn uses_placeholder_in(&self, subject_type: SubjectType, container_id: Option<&str>) -> bool {
        self.session()
            .is_some_and(|s| s.uses_placeholder_in(subject_type, container_id))
    }

    /// Fold one gesture event. Only a start during an active drag is refused.
    pub fn dispatch(&mut self, event: DragEvent) -> Result<Outcome, DragError> {
        let step = self.drag.step(event)?;
        debug!(from = ?self.drag.phase(), through = ?step.phase, "drag step");
        self.drag = step.state;

        let outcome = match step.effect {
            Effect::None if self.drag.is_dragging() => Outcome::Dragging,
            Effect::None => Outcome::Ignored,
            Effect::Cancel(session) => Outcome::Cancelled(session),
            Effect::Commit(session) => self.apply(session),
        };
        Ok(outcome)
    }

    fn apply(&mut self, session: DragSession) -> Outcome {
        match commit::commit(&self.board, &session) {
            Ok(next) if Arc::ptr_eq(&next, &self.board) => Outcome::Unchanged(session),
            Ok(next) => {
                self.board = next;
                Outcome::Committed(session)
            }
            Err(err) => commit_failure(session, err),
        }
    }
}

/// Outcome of a commit that failed. The board is never touched here.
///
/// Identity violations panic in debug builds.
fn commit_failure(session: DragSession, err: CommitError) -> Outcome {
    match err {
        CommitError::InvalidDropTarget(reason) => {
            debug!(%reason, "drop on a dead target, treated as cancel");
            Outcome::Cancelled(session)
        }
        err @ CommitError::IdentityInvariantViolation(_) => {
            if cfg!(debug_assertions) {
                panic!("commit produced an invalid board: {}", err);
            }
            error!(error = %err, "commit rejected, keeping previous board");
            Outcome::Aborted {
                session,
                error: err,
            }
        }
        err => {
            warn!(error = %err, "commit failed, keeping previous board");
            Outcome::Aborted {
                session,
                error: err,
            }
        }
    }
}
