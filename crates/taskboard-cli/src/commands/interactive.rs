/*
[INPUT]:  Menu selections and text input from the terminal
[OUTPUT]: Admin/worker actions applied to the session's store
[POS]:    CLI interactive flow - both panels in one menu loop
[UPDATE]: When adding menu actions
*/

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use taskboard_core::admin::status_counts;
use taskboard_core::worker::pending_view;
use taskboard_core::{DurableStorage, TaskId};

use super::{Session, admin, worker};
use crate::photo::read_photo;
use crate::prompt::Prompter;

pub async fn run_interactive<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    theme: &ColorfulTheme,
) -> Result<()> {
    println!("{}", style("Task Board").bold().cyan());

    loop {
        let counts = status_counts(session.store.tasks());
        println!(
            "{}",
            style(format!(
                "pending {} | approved {} | rejected {}",
                counts.pending, counts.approved, counts.rejected
            ))
            .dim()
        );

        let actions = vec![
            "Add emails",
            "Copy approved list",
            "Delete task",
            "Delete all tasks",
            "Show all tasks",
            "Approve task",
            "Reject task",
            "Show completed tasks",
            "Exit",
        ];
        let selection = Select::with_theme(theme)
            .with_prompt("Select action")
            .items(&actions)
            .default(0)
            .interact()?;

        let outcome = match selection {
            0 => add_emails(session, theme),
            1 => admin::export(session, None),
            2 => delete_task(session, theme),
            3 => admin::clear(session),
            4 => {
                admin::list(session);
                Ok(())
            }
            5 => approve_task(session, theme).await,
            6 => reject_task(session, theme),
            7 => {
                worker::show_completed(session);
                Ok(())
            }
            _ => return Ok(()),
        };

        // A failed save keeps the in-memory change; report it and keep the session going
        if let Err(err) = outcome {
            session.prompter.warn(&format!("{err:#}"));
        }
    }
}

fn add_emails<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    theme: &ColorfulTheme,
) -> Result<()> {
    println!("{}", style("One email per line, empty line to finish").dim());
    let mut lines = Vec::new();
    loop {
        let line: String = Input::with_theme(theme)
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    admin::add_emails(session, &lines.join("\n"))?;
    Ok(())
}

fn select_task<S: DurableStorage, P: Prompter>(
    session: &Session<S, P>,
    theme: &ColorfulTheme,
    prompt: &str,
    pending_only: bool,
) -> Result<Option<TaskId>> {
    let tasks: Vec<_> = if pending_only {
        pending_view(session.store.tasks())
    } else {
        session.store.tasks().iter().collect()
    };
    if tasks.is_empty() {
        println!("{}", style("No tasks found.").yellow());
        return Ok(None);
    }

    let items: Vec<String> = tasks
        .iter()
        .map(|task| format!("{} | {}", task.email, task.status))
        .collect();
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Some(tasks[selection].id.clone()))
}

fn delete_task<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(id) = select_task(session, theme, "Select task to delete", false)? else {
        return Ok(());
    };
    admin::delete(session, &id)
}

async fn approve_task<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(id) = select_task(session, theme, "Select task to approve", true)? else {
        return Ok(());
    };

    let attach = Confirm::with_theme(theme)
        .with_prompt("Attach a photo?")
        .default(false)
        .interact()?;
    let photo = if attach {
        let path: String = Input::with_theme(theme)
            .with_prompt("Photo path")
            .interact_text()?;
        Some(read_photo(&PathBuf::from(path.trim())).await?)
    } else {
        None
    };

    worker::approve_task(session, &id, photo)
}

fn reject_task<S: DurableStorage, P: Prompter>(
    session: &mut Session<S, P>,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(id) = select_task(session, theme, "Select task to reject", true)? else {
        return Ok(());
    };
    worker::reject_task(session, &id)
}
