/*
[INPUT]:  Admin subcommands (add, export, delete, clear, list, stats)
[OUTPUT]: Store updates after confirmation, export text, task listings
[POS]:    CLI command layer - administrator role
[UPDATE]: When adding admin actions or changing their messages
*/

use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use taskboard_core::admin::{
    bulk_add_emails, delete_all, delete_task, export_approved, status_counts,
};
use taskboard_core::{DurableStorage, OperationError, TaskId};

use super::{Session, format_task_line};
use crate::prompt::Prompter;

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Add one pending task per email (arguments, --file, or stdin)
    Add {
        emails: Vec<String>,
        #[arg(long, value_name = "PATH", conflicts_with = "emails")]
        file: Option<PathBuf>,
    },
    /// Print approved tasks as "<email> - Photo Uploaded|No Photo" lines
    Export {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Delete a single task
    Delete {
        id: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete every task
    Clear {
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List all tasks
    List,
    /// Show per-status counts
    Stats,
}

impl AdminCommand {
    /// Whether the command was invoked with a confirmation bypass
    pub fn assume_yes(&self) -> bool {
        matches!(self, AdminCommand::Delete { yes: true, .. } | AdminCommand::Clear { yes: true })
    }
}

pub fn run<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    command: AdminCommand,
) -> Result<()> {
    match command {
        AdminCommand::Add { emails, file } => {
            let raw_text = read_email_input(&emails, file.as_deref())?;
            add_emails(session, &raw_text)?;
        }
        AdminCommand::Export { output } => export(session, output.as_deref())?,
        AdminCommand::Delete { id, .. } => delete(session, &TaskId::from(id))?,
        AdminCommand::Clear { .. } => clear(session)?,
        AdminCommand::List => list(session),
        AdminCommand::Stats => stats(session),
    }
    Ok(())
}

/// Email text from arguments, a file, or stdin, in that order
pub fn read_email_input(emails: &[String], file: Option<&Path>) -> Result<String> {
    if !emails.is_empty() {
        return Ok(emails.join("\n"));
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("read emails from {}", path.display()));
    }
    let mut raw_text = String::new();
    std::io::stdin()
        .read_to_string(&mut raw_text)
        .context("read emails from stdin")?;
    Ok(raw_text)
}

/// Returns the number of tasks added (zero when the input had no emails)
pub fn add_emails<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    raw_text: &str,
) -> Result<usize> {
    match bulk_add_emails(session.store.tasks(), raw_text) {
        Ok(result) => {
            session.commit(result.tasks)?;
            info!(added = result.added, "emails added");
            session
                .prompter
                .notice(&format!("{} email(s) added.", result.added));
            Ok(result.added)
        }
        Err(OperationError::NoValidEmails) => {
            session
                .prompter
                .warn("Please enter valid email addresses (one per line).");
            Ok(0)
        }
        Err(err) => Err(err.into()),
    }
}

pub fn export<S: DurableStorage, P: Prompter>(
    session: &Session<S, P>,
    output: Option<&Path>,
) -> Result<()> {
    let export = match export_approved(session.store.tasks()) {
        Ok(export) => export,
        Err(OperationError::NoApprovedTasks) => {
            session.prompter.warn("No approved tasks.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match output {
        Some(path) => std::fs::write(path, format!("{}\n", export.text))
            .with_context(|| format!("write export to {}", path.display()))?,
        None => println!("{}", export.text),
    }
    session
        .prompter
        .notice(&format!("{} approved task(s) exported.", export.count));
    Ok(())
}

pub fn delete<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    id: &TaskId,
) -> Result<()> {
    let Some(task) = session.store.tasks().iter().find(|task| &task.id == id) else {
        session.prompter.warn(&format!("Task {id} not found."));
        return Ok(());
    };

    let prompt = format!("Delete task {} ({})?", task.id, task.email);
    if !session.prompter.confirm(&prompt)? {
        session.prompter.notice("Cancelled.");
        return Ok(());
    }

    let tasks = delete_task(session.store.tasks(), id);
    session.commit(tasks)?;
    session.prompter.notice("Task deleted.");
    Ok(())
}

pub fn clear<S: DurableStorage, P: Prompter>(session: &mut Session<S, P>) -> Result<()> {
    let count = session.store.tasks().len();
    if count == 0 {
        session.prompter.notice("No tasks.");
        return Ok(());
    }
    if !session
        .prompter
        .confirm(&format!("Delete all {count} task(s)?"))?
    {
        session.prompter.notice("Cancelled.");
        return Ok(());
    }

    let tasks = delete_all(session.store.tasks());
    session.commit(tasks)?;
    session
        .prompter
        .notice(&format!("{count} task(s) deleted."));
    Ok(())
}

pub fn list<S: DurableStorage, P: Prompter>(session: &Session<S, P>) {
    let tasks = session.store.tasks();
    if tasks.is_empty() {
        session.prompter.notice("No tasks.");
        return;
    }
    for task in tasks {
        println!("{}", format_task_line(task));
    }
}

pub fn stats<S: DurableStorage, P: Prompter>(session: &Session<S, P>) {
    let counts = status_counts(session.store.tasks());
    println!("pending: {}", counts.pending);
    println!("approved: {}", counts.approved);
    println!("rejected: {}", counts.rejected);
    println!("total: {}", counts.total());
}
