/*
[INPUT]:  Worker subcommands (pending, completed, approve, reject)
[OUTPUT]: Task views and status transitions saved to the store
[POS]:    CLI command layer - worker role
[UPDATE]: When adding worker actions or changing their messages
*/

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use taskboard_core::worker::{approve, completed_view, pending_view, reject};
use taskboard_core::{DurableStorage, PhotoData, StatusChange, TaskId, TransitionOutcome};

use super::Session;
use crate::photo::read_photo;
use crate::prompt::Prompter;

#[derive(Subcommand, Debug)]
pub enum WorkerCommand {
    /// List tasks waiting for a verdict
    Pending,
    /// List approved and rejected tasks
    Completed,
    /// Approve a pending task, optionally attaching a photo
    Approve {
        id: String,
        #[arg(long, value_name = "PATH")]
        photo: Option<PathBuf>,
    },
    /// Reject a pending task
    Reject { id: String },
}

pub async fn run<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    command: WorkerCommand,
) -> Result<()> {
    match command {
        WorkerCommand::Pending => show_pending(session),
        WorkerCommand::Completed => show_completed(session),
        WorkerCommand::Approve { id, photo } => {
            let photo = match photo {
                Some(path) => Some(read_photo(&path).await?),
                None => None,
            };
            approve_task(session, &TaskId::from(id), photo)?;
        }
        WorkerCommand::Reject { id } => reject_task(session, &TaskId::from(id))?,
    }
    Ok(())
}

pub fn show_pending<S: DurableStorage, P: Prompter>(session: &Session<S, P>) {
    let pending = pending_view(session.store.tasks());
    if pending.is_empty() {
        session.prompter.notice("No pending tasks.");
        return;
    }
    for task in pending {
        println!("{} | {}", task.id, task.email);
    }
}

pub fn show_completed<S: DurableStorage, P: Prompter>(session: &Session<S, P>) {
    let completed = completed_view(session.store.tasks());
    if completed.is_empty() {
        session.prompter.notice("No completed tasks.");
        return;
    }
    for task in completed {
        let marker = if task.has_photo() { " [photo]" } else { "" };
        println!("{} - {}{}", task.email, task.status, marker);
    }
}

pub fn approve_task<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    id: &TaskId,
    photo: Option<PhotoData>,
) -> Result<()> {
    let change = approve(session.store.tasks(), id, photo);
    apply_change(session, id, change)
}

pub fn reject_task<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    id: &TaskId,
) -> Result<()> {
    let change = reject(session.store.tasks(), id);
    apply_change(session, id, change)
}

fn apply_change<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    id: &TaskId,
    change: StatusChange,
) -> Result<()> {
    match change.outcome {
        TransitionOutcome::Applied => {
            session.commit(change.tasks)?;
            if let Some(task) = session.store.tasks().iter().find(|task| &task.id == id) {
                let message = format!("{} marked {}.", task.email, task.status);
                session.prompter.notice(&message);
            }
        }
        TransitionOutcome::NotFound => {
            session.prompter.warn(&format!("Task {id} not found."));
        }
        TransitionOutcome::Rejected { from, .. } => {
            session
                .prompter
                .warn(&format!("Task {id} is already {from}."));
        }
    }
    Ok(())
}
