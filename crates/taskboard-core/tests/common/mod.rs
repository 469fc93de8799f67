/*
[INPUT]:  Temp directories and task field values
[OUTPUT]: Shared fixtures for taskboard-core integration tests
[POS]:    Test infrastructure - shared across test modules
[UPDATE]: When adding new fixtures
*/

//! Common test utilities for taskboard-core tests

use chrono::Utc;
use taskboard_core::{
    CorruptDataPolicy, DEFAULT_STORAGE_KEY, FileStorage, PhotoData, Task, TaskStatus, TaskStore,
};
use tempfile::TempDir;

/// Open a store over a file backend rooted in `dir`
pub fn file_store(dir: &TempDir) -> TaskStore<FileStorage> {
    TaskStore::load(
        FileStorage::new(dir.path()),
        DEFAULT_STORAGE_KEY,
        CorruptDataPolicy::Fail,
    )
    .expect("load task store")
}

pub fn pending(email: &str) -> Task {
    Task::new(email, Utc::now())
}

pub fn approved(email: &str, photo: Option<&str>) -> Task {
    let mut task = Task::new(email, Utc::now());
    task.status = TaskStatus::Approved;
    task.photo = photo.map(PhotoData::new);
    task
}
