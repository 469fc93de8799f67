/*
[INPUT]:  Opened TaskStore and a Prompter
[OUTPUT]: Session shared by admin, worker and interactive commands
[POS]:    CLI command layer - wiring between operations and the store
[UPDATE]: When adding command groups or changing how changes are saved
*/

pub mod admin;
pub mod init;
pub mod interactive;
pub mod worker;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use taskboard_core::{DurableStorage, Task, TaskStore};

use crate::prompt::Prompter;

/// One CLI session: the store it owns and the user it talks to
pub struct Session<S: DurableStorage, P: Prompter> {
    pub store: TaskStore<S>,
    pub prompter: P,
}

impl<S: DurableStorage, P: Prompter> Session<S, P> {
    pub fn new(store: TaskStore<S>, prompter: P) -> Self {
        Self { store, prompter }
    }

    /// Hand a fully computed list to the store
    pub fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.store
            .replace(tasks)
            .context("changes applied in memory but could not be saved")
    }
}

/// One line per task for list output
pub fn format_task_line(task: &Task) -> String {
    let created: DateTime<Local> = task.created_at.into();
    format!(
        "{} | {} | {} | {} | {}",
        task.id,
        task.email,
        task.status,
        if task.has_photo() { "photo" } else { "-" },
        created.format("%Y-%m-%d %H:%M")
    )
}
