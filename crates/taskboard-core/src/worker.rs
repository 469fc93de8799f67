/*
[INPUT]:  Current task list plus worker verdicts and optional photo data
[OUTPUT]: Pending/completed views and lists with one task transitioned
[POS]:    Board operations - worker role
[UPDATE]: When worker actions or view filters change
*/

use tracing::{debug, warn};

use crate::types::{PhotoData, Task, TaskId, TaskStatus};

/// What a status update did to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    NotFound,
    /// Transition not in the table; the task was left untouched
    Rejected { from: TaskStatus, to: TaskStatus },
}

/// New list after a status update, plus what happened
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub tasks: Vec<Task>,
    pub outcome: TransitionOutcome,
}

impl StatusChange {
    pub fn applied(&self) -> bool {
        self.outcome == TransitionOutcome::Applied
    }
}

pub fn pending_view(current: &[Task]) -> Vec<&Task> {
    current
        .iter()
        .filter(|task| task.status == TaskStatus::Pending)
        .collect()
}

pub fn completed_view(current: &[Task]) -> Vec<&Task> {
    current
        .iter()
        .filter(|task| task.status.is_terminal())
        .collect()
}

/// Move task `id` to `status`; an approval sets `photo` to exactly the value given
///
/// Every other task and field is carried over unchanged. Unknown ids and
/// transitions outside the status table return the list as it was.
pub fn set_status(
    current: &[Task],
    id: &TaskId,
    status: TaskStatus,
    photo: Option<PhotoData>,
) -> StatusChange {
    let Some(index) = current.iter().position(|task| &task.id == id) else {
        debug!(task_id = %id, "status target not found");
        return StatusChange {
            tasks: current.to_vec(),
            outcome: TransitionOutcome::NotFound,
        };
    };

    let from = current[index].status;
    let next = match from.transition(status) {
        Ok(next) => next,
        Err(err) => {
            warn!(task_id = %id, error = %err, "status transition rejected");
            return StatusChange {
                tasks: current.to_vec(),
                outcome: TransitionOutcome::Rejected { from, to: status },
            };
        }
    };

    let mut tasks = current.to_vec();
    let task = &mut tasks[index];
    task.status = next;
    if next == TaskStatus::Approved {
        task.photo = photo;
    } else if photo.is_some() {
        debug!(task_id = %id, status = %next, "photo ignored for non-approval");
    }

    debug!(task_id = %id, from = %from, to = %next, "status updated");
    StatusChange {
        tasks,
        outcome: TransitionOutcome::Applied,
    }
}

pub fn approve(current: &[Task], id: &TaskId, photo: Option<PhotoData>) -> StatusChange {
    set_status(current, id, TaskStatus::Approved, photo)
}

pub fn reject(current: &[Task], id: &TaskId) -> StatusChange {
    set_status(current, id, TaskStatus::Rejected, None)
}
