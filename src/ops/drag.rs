//! Drag gesture lifecycle.
//!
//! A gesture is a message stream: one [`DragEvent::Start`], any number of
//! [`DragEvent::Update`], then one [`DragEvent::End`] (or [`DragEvent::Cancel`]).
//! [`DragState::step`] folds one message into the current state and returns
//! the next state plus what the caller has to do about it. Nothing here touches
//! the board; committing is the store's job.

use serde::Serialize;
use tracing::{debug, warn};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Column,
    Item,
}

impl std::fmt::Display for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectType::Column => write!(f, "column"),
            SubjectType::Item => write!(f, "item"),
        }
    }
}

/// One gesture's source, candidate destination and subject.
///
/// Containers are named by column id. Column drags live in the board-level
/// container, which has no id (`None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragSession {
    pub subject_type: SubjectType,
    pub source_container_id: Option<String>,
    pub source_index: usize,
    pub destination_container_id: Option<String>,
    /// `None` while the gesture is not over a valid drop target
    pub destination_index: Option<usize>,
    pub using_placeholder: bool,
}

impl DragSession {
    /// A freshly lifted subject: the destination starts out at the source.
    pub fn begin(subject_type: SubjectType, container_id: Option<String>, index: usize) -> Self {
        DragSession {
            subject_type,
            destination_container_id: container_id.clone(),
            source_container_id: container_id,
            source_index: index,
            destination_index: Some(index),
            using_placeholder: true,
        }
    }

    /// Same session retargeted at a new candidate destination.
    pub fn retarget(&self, container_id: Option<String>, index: Option<usize>) -> Self {
        DragSession {
            destination_container_id: container_id,
            destination_index: index,
            ..self.clone()
        }
    }

    /// Whether the destination container is the source container.
    pub fn is_same_container(&self) -> bool {
        self.source_container_id == self.destination_container_id
    }

    /// Dropping here would change nothing.
    pub fn is_noop(&self) -> bool {
        match self.destination_index {
            None => true,
            Some(dst) => self.is_same_container() && dst == self.source_index,
        }
    }

    /// Whether the window for `container` must reserve an extra slot.
    ///
    /// The origin container reserves it for the whole drag, since its row for
    /// the lifted subject is empty. A foreign container reserves it while it is
    /// the candidate destination, to open room for the incoming subject.
    pub fn uses_placeholder_in(&self, subject_type: SubjectType, container_id: Option<&str>) -> bool {
        if !self.using_placeholder || subject_type != self.subject_type {
            return false;
        }
        if self.source_container_id.as_deref() == container_id {
            return true;
        }
        self.destination_index.is_some() && self.destination_container_id.as_deref() == container_id
    }

    /// The source row of `container` that is currently lifted out of flow.
    pub fn lifted_index_in(&self, subject_type: SubjectType, container_id: Option<&str>) -> Option<usize> {
        (self.subject_type == subject_type && self.source_container_id.as_deref() == container_id)
            .then_some(self.source_index)
    }
}

/// A message from the gesture capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start {
        subject_type: SubjectType,
        container_id: Option<String>,
        index: usize,
    },
    Update {
        container_id: Option<String>,
        index: Option<usize>,
    },
    End {
        container_id: Option<String>,
        index: Option<usize>,
    },
    /// External cancellation (focus loss, Esc)
    Cancel,
}

/// Where the machine currently rests. `Committing` and `Cancelled` are
/// passed through within a single step and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Phases of the lifecycle, including the transient ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Committing,
    Cancelled,
}

/// What the caller must do after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Apply this completed session to the board
    Commit(DragSession),
    /// Gesture ended without a commit; the board stays as it is
    Cancel(DragSession),
}

/// Result of folding one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: DragState,
    /// The phase this event drove the machine through
    pub phase: DragPhase,
    pub effect: Effect,
}

/// Error type for gesture protocol misuse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("a {0} drag is already in progress")]
    AlreadyDragging(SubjectType),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn phase(&self) -> DragPhase {
        match self {
            DragState::Idle => DragPhase::Idle,
            DragState::Dragging(_) => DragPhase::Dragging,
        }
    }

    /// Fold one gesture event into the machine.
    pub fn step(&self, event: DragEvent) -> Result<Step, DragError> {
        match (self, event) {
            (
                DragState::Idle,
                DragEvent::Start {
                    subject_type,
                    container_id,
                    index,
                },
            ) => {
                debug!(%subject_type, ?container_id, index, "drag start");
                Ok(Step {
                    state: DragState::Dragging(DragSession::begin(subject_type, container_id, index)),
                    phase: DragPhase::Dragging,
                    effect: Effect::None,
                })
            }
            (DragState::Dragging(session), DragEvent::Start { .. }) => {
                warn!(subject = %session.subject_type, "drag start rejected, gesture already active");
                Err(DragError::AlreadyDragging(session.subject_type))
            }
            (DragState::Dragging(session), DragEvent::Update { container_id, index }) => Ok(Step {
                state: DragState::Dragging(session.retarget(container_id, index)),
                phase: DragPhase::Dragging,
                effect: Effect::None,
            }),
            (DragState::Dragging(session), DragEvent::End { container_id, index }) => {
                let done = session.retarget(container_id, index);
                if done.destination_index.is_some() {
                    debug!(
                        destination = ?done.destination_container_id,
                        index = ?done.destination_index,
                        "drag end, committing"
                    );
                    Ok(Step {
                        state: DragState::Idle,
                        phase: DragPhase::Committing,
                        effect: Effect::Commit(done),
                    })
                } else {
                    debug!("drag end without a target, cancelling");
                    Ok(Step {
                        state: DragState::Idle,
                        phase: DragPhase::Cancelled,
                        effect: Effect::Cancel(done),
                    })
                }
            }
            (DragState::Dragging(session), DragEvent::Cancel) => {
                debug!("drag cancelled");
                Ok(Step {
                    state: DragState::Idle,
                    phase: DragPhase::Cancelled,
                    effect: Effect::Cancel(session.clone()),
                })
            }
            (DragState::Idle, event) => {
                debug!(?event, "gesture event with no active drag, ignored");
                Ok(Step {
                    state: DragState::Idle,
                    phase: DragPhase::Idle,
                    effect: Effect::None,
                })
            }
        }
    }
}
