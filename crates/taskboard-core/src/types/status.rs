/*
[INPUT]:  Worker verdicts (approve / reject) applied to a task status
[OUTPUT]: Closed TaskStatus enum with validated transitions
[POS]:    Data layer - task lifecycle state machine
[UPDATE]: When task statuses or allowed transitions change
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Approved,
    Rejected,
}

/// Errors occurring during status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] =
        [TaskStatus::Pending, TaskStatus::Approved, TaskStatus::Rejected];

    /// Check whether moving from this status to `to` is listed in the transition table
    pub fn can_transition(self, to: TaskStatus) -> bool {
        matches!(
            (self, to),
            (TaskStatus::Pending, TaskStatus::Approved)
                | (TaskStatus::Pending, TaskStatus::Rejected)
        )
    }

    /// Validate a transition and return the resulting status
    pub fn transition(self, to: TaskStatus) -> Result<TaskStatus, TransitionError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(TransitionError::InvalidTransition { from: self, to })
        }
    }

    /// Approved and rejected tasks never leave their status
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Approved => "approved",
            TaskStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
