/*
[INPUT]:  Current task list plus administrator input (email text, task ids)
[OUTPUT]: New task lists, export text and status counts
[POS]:    Board operations - administrator role
[UPDATE]: When administrator actions or export format change
*/

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::OperationError;
use crate::types::{Task, TaskId, TaskStatus, is_email};

/// Outcome of a successful bulk add
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAdd {
    pub tasks: Vec<Task>,
    pub added: usize,
}

/// Export text for approved tasks, one line per task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub text: String,
    pub count: usize,
}

/// Per-status task totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

/// Append one pending task per email line in `raw_text`
pub fn bulk_add_emails(current: &[Task], raw_text: &str) -> Result<BulkAdd, OperationError> {
    bulk_add_emails_at(current, raw_text, Utc::now())
}

/// Same as [`bulk_add_emails`] with an explicit creation time
pub fn bulk_add_emails_at(
    current: &[Task],
    raw_text: &str,
    now: DateTime<Utc>,
) -> Result<BulkAdd, OperationError> {
    let emails: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| is_email(line))
        .collect();

    if emails.is_empty() {
        return Err(OperationError::NoValidEmails);
    }

    let mut tasks = Vec::with_capacity(current.len() + emails.len());
    tasks.extend_from_slice(current);
    for email in &emails {
        let mut task = Task::new(*email, now);
        while tasks.iter().any(|existing| existing.id == task.id) {
            task.id = TaskId::generate();
        }
        tasks.push(task);
    }

    debug!(added = emails.len(), total = tasks.len(), "bulk add");
    Ok(BulkAdd {
        tasks,
        added: emails.len(),
    })
}

/// Render approved tasks as `<email> - Photo Uploaded` / `<email> - No Photo` lines
pub fn export_approved(current: &[Task]) -> Result<Export, OperationError> {
    let lines: Vec<String> = current
        .iter()
        .filter(|task| task.status == TaskStatus::Approved)
        .map(|task| {
            let photo = if task.has_photo() {
                "Photo Uploaded"
            } else {
                "No Photo"
            };
            format!("{} - {}", task.email, photo)
        })
        .collect();

    if lines.is_empty() {
        return Err(OperationError::NoApprovedTasks);
    }

    Ok(Export {
        count: lines.len(),
        text: lines.join("\n"),
    })
}

/// Remove the task with `id`; unknown ids leave the list unchanged
pub fn delete_task(current: &[Task], id: &TaskId) -> Vec<Task> {
    let tasks: Vec<Task> = current.iter().filter(|task| &task.id != id).cloned().collect();
    if tasks.len() == current.len() {
        debug!(task_id = %id, "delete target not found");
    }
    tasks
}

pub fn delete_all(_current: &[Task]) -> Vec<Task> {
    Vec::new()
}

pub fn status_counts(current: &[Task]) -> StatusCounts {
    current
        .iter()
        .fold(StatusCounts::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::Approved => counts.approved += 1,
                TaskStatus::Rejected => counts.rejected += 1,
            }
            counts
        })
}
