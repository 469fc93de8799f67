/*
[INPUT]:  CLI arguments, YAML configuration file, TASKBOARD_* environment
[OUTPUT]: Admin/worker actions applied to the persisted task board
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod commands;
mod config;
mod logging;
mod photo;
mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use std::path::PathBuf;
use tracing::info;

use taskboard_core::{FileStorage, TaskStore};

use crate::commands::Session;
use crate::commands::admin::AdminCommand;
use crate::commands::worker::WorkerCommand;
use crate::config::{BoardConfig, default_config_path};
use crate::prompt::ConsolePrompter;

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Email task board for administrators and workers")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "data-dir", value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Administrator actions
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Worker actions
    #[command(subcommand)]
    Worker(WorkerCommand),
    /// Menu-driven session (default)
    Interactive,
    /// Write a configuration file
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = BoardConfig::load(args.config_path.as_deref())?;
    config.apply_overrides(args.data_dir, args.log_level);
    let _log_guard = logging::init_tracing(&config.log.level, config.log.file.as_deref())?;

    let command = args.command.unwrap_or(Command::Interactive);

    if let Command::Init { output } = &command {
        let output = output
            .clone()
            .or_else(default_config_path)
            .context("could not determine config path; pass --output")?;
        return commands::init::run_init(&output, &ColorfulTheme::default());
    }

    let data_dir = config.resolve_data_dir()?;
    info!(
        data_dir = %data_dir.display(),
        storage_key = %config.storage_key,
        "opening task board"
    );
    let store = TaskStore::load(
        FileStorage::new(&data_dir),
        config.storage_key.clone(),
        config.on_corrupt,
    )
    .with_context(|| format!("load tasks from {}", data_dir.display()))?;

    match command {
        Command::Admin(action) => {
            let mut session = Session::new(store, ConsolePrompter::new(action.assume_yes()));
            commands::admin::run(&mut session, action)
        }
        Command::Worker(action) => {
            let mut session = Session::new(store, ConsolePrompter::new(false));
            commands::worker::run(&mut session, action).await
        }
        Command::Interactive => {
            let mut session = Session::new(store, ConsolePrompter::new(false));
            commands::interactive::run_interactive(&mut session, &ColorfulTheme::default()).await
        }
        Command::Init { .. } => Ok(()),
    }
}
