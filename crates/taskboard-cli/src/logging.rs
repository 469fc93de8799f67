/*
[INPUT]:  Log filter directive and optional log file path
[OUTPUT]: Installed tracing subscriber (stderr or non-blocking file writer)
[POS]:    Observability layer - process-wide logging setup
[UPDATE]: When changing log destinations or formatting
*/

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; keep the returned guard alive to flush file logs
pub fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_file)?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(Some(guard))
}

/// Non-rotating appender for `log_file`; open failures are returned, not panicked on
pub fn file_appender(log_file: &Path) -> Result<RollingFileAppender> {
    let dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .context("log file path must name a file")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("open log file {}", log_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_appender_creates_log_file() {
        let tmp_dir = TempDir::new().unwrap();
        let log_file = tmp_dir.path().join("logs").join("board.log");

        let appender = file_appender(&log_file).unwrap();
        drop(appender);
        assert!(log_file.exists());
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let tmp_dir = TempDir::new().unwrap();
        let occupied = tmp_dir.path().join("board.log");
        std::fs::create_dir(&occupied).unwrap();

        let err = file_appender(&occupied).unwrap_err();
        assert!(err.to_string().contains("open log file"));
    }
}
