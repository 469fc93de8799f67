use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

struct Board {
    dir: TempDir,
    config: PathBuf,
}

impl Board {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = dir.path().join("config.yaml");
        let yaml = format!(
            "data_dir: {}\nlog:\n  level: error\n",
            dir.path().join("data").display()
        );
        std::fs::write(&config, yaml).expect("write config");
        Self { dir, config }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn command(&self, args: &[&str]) -> Command {
        let binary_path = env!("CARGO_BIN_EXE_taskboard");
        let mut command = Command::new(binary_path);
        command.arg("--config").arg(&self.config).args(args);
        command
    }

    fn run(&self, args: &[&str]) -> Output {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to start taskboard binary");
        assert!(
            output.status.success(),
            "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    fn stdout(&self, args: &[&str]) -> String {
        String::from_utf8_lossy(&self.run(args).stdout).into_owned()
    }

    fn first_id(&self) -> String {
        let listing = self.stdout(&["admin", "list"]);
        listing
            .lines()
            .next()
            .and_then(|line| line.split(" | ").next())
            .expect("task line")
            .to_string()
    }
}

fn write_photo(dir: &Path) -> PathBuf {
    let path = dir.join("proof.png");
    std::fs::write(&path, [0u8, 0, 0]).expect("write photo");
    path
}

#[test]
fn cli_admin_add_list_and_stats() {
    let board = Board::new();
    board.run(&["admin", "add", "a@x.com", "b@x.com"]);

    let listing = board.stdout(&["admin", "list"]);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("| a@x.com | pending | - |"));
    assert!(lines[1].contains("| b@x.com | pending | - |"));

    let stats = board.stdout(&["admin", "stats"]);
    assert!(stats.contains("pending: 2"));
    assert!(stats.contains("total: 2"));

    assert!(board.data_dir().join("tasks.json").exists());
}

#[test]
fn cli_admin_add_reads_stdin() {
    let board = Board::new();
    let mut child = board
        .command(&["admin", "add"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn taskboard");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"a@x.com\n \nb@x.com\nnotanemail\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait taskboard");
    assert!(output.status.success());

    let pending = board.stdout(&["worker", "pending"]);
    let emails: Vec<&str> = pending
        .lines()
        .filter_map(|line| line.split(" | ").nth(1))
        .collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
}

#[test]
fn cli_invalid_emails_change_nothing() {
    let board = Board::new();
    let output = board.run(&["admin", "add", "nobody", "here"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("valid email"));
    assert!(!board.data_dir().join("tasks.json").exists());
}

#[test]
fn cli_worker_approve_with_photo_then_export() {
    let board = Board::new();
    board.run(&["admin", "add", "a@x.com", "b@x.com", "c@x.com"]);
    let listing = board.stdout(&["admin", "list"]);
    let ids: Vec<String> = listing
        .lines()
        .filter_map(|line| line.split(" | ").next())
        .map(str::to_string)
        .collect();
    assert_eq!(ids.len(), 3);

    let photo = write_photo(board.dir.path());
    let photo_arg = photo.to_string_lossy().into_owned();
    board.run(&["worker", "approve", &ids[0], "--photo", &photo_arg]);
    board.run(&["worker", "approve", &ids[2]]);
    board.run(&["worker", "reject", &ids[1]]);

    let export = board.stdout(&["admin", "export"]);
    assert_eq!(export, "a@x.com - Photo Uploaded\nc@x.com - No Photo\n");

    let completed = board.stdout(&["worker", "completed"]);
    assert!(completed.contains("a@x.com - approved [photo]"));
    assert!(completed.contains("b@x.com - rejected"));

    let record = std::fs::read_to_string(board.data_dir().join("tasks.json")).unwrap();
    assert!(record.contains("data:image/png;base64,AAAA"));
}

#[test]
fn cli_delete_and_clear_with_yes() {
    let board = Board::new();
    board.run(&["admin", "add", "a@x.com", "b@x.com"]);

    let id = board.first_id();
    board.run(&["admin", "delete", &id, "--yes"]);
    let listing = board.stdout(&["admin", "list"]);
    assert_eq!(listing.lines().count(), 1);
    assert!(listing.contains("b@x.com"));

    board.run(&["admin", "clear", "--yes"]);
    assert_eq!(board.stdout(&["admin", "list"]), "");
}

#[test]
fn cli_corrupt_record_is_quarantined() {
    let board = Board::new();
    std::fs::create_dir_all(board.data_dir()).unwrap();
    std::fs::write(board.data_dir().join("tasks.json"), "{not json").unwrap();

    assert_eq!(board.stdout(&["admin", "list"]), "");
    let quarantined = std::fs::read_to_string(board.data_dir().join("tasks.1.corrupt")).unwrap();
    assert_eq!(quarantined, "{not json");
}

#[test]
fn cli_data_dir_flag_overrides_config_file() {
    let board = Board::new();
    let flagged = board.dir.path().join("flagged");
    let flagged_arg = flagged.to_string_lossy().into_owned();

    board.run(&["--data-dir", &flagged_arg, "admin", "add", "a@x.com"]);

    assert!(flagged.join("tasks.json").exists());
    assert!(!board.data_dir().join("tasks.json").exists());
    assert_eq!(board.stdout(&["admin", "list"]), "");
    let listing = board.stdout(&["--data-dir", &flagged_arg, "admin", "list"]);
    assert!(listing.contains("| a@x.com | pending |"));
}
