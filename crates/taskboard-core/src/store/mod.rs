/*
[INPUT]:  DurableStorage backend, storage key and corrupt-data policy
[OUTPUT]: TaskStore holding the authoritative task list, mirrored on every replace
[POS]:    Persistence layer - single owner of the task list
[UPDATE]: When the load/replace contract or record format changes
*/

pub mod backend;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::types::Task;

pub use backend::{DurableStorage, FileStorage, MemoryStorage};

/// Default storage key for the task list record
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// What to do when the persisted record cannot be used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Move the bad record aside and start with an empty list
    #[default]
    Reset,
    /// Refuse to load
    Fail,
}

/// Serialize a task list into the durable record format
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Parse a durable record, enforcing per-task validity and unique ids
pub fn decode_tasks(key: &str, raw: &str) -> Result<Vec<Task>> {
    let corrupt = |reason: String| StoreError::Corrupt {
        key: key.to_string(),
        reason,
    };

    let tasks: Vec<Task> = serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        task.validate().map_err(|e| corrupt(e.to_string()))?;
        if !seen.insert(&task.id) {
            return Err(corrupt(format!("duplicate task id {}", task.id)));
        }
    }
    Ok(tasks)
}

/// Owner of the task list for the session
///
/// All mutation goes through [`TaskStore::replace`], which swaps the whole
/// list and writes the whole record.
#[derive(Debug)]
pub struct TaskStore<S: DurableStorage> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: DurableStorage> TaskStore<S> {
    /// Rehydrate from `storage`; a missing record yields an empty list
    pub fn load(mut storage: S, key: impl Into<String>, policy: CorruptDataPolicy) -> Result<Self> {
        let key = key.into();

        let tasks = match storage.get(&key)? {
            None => Vec::new(),
            Some(raw) => match decode_tasks(&key, &raw) {
                Ok(tasks) => tasks,
                Err(err) => match policy {
                    CorruptDataPolicy::Fail => return Err(err),
                    CorruptDataPolicy::Reset => {
                        let moved_to = storage.quarantine(&key)?;
                        warn!(
                            key = %key,
                            error = %err,
                            moved_to = moved_to.as_deref().unwrap_or("-"),
                            "persisted tasks unreadable; starting empty"
                        );
                        Vec::new()
                    }
                },
            },
        };

        info!(key = %key, task_count = tasks.len(), "task store loaded");
        Ok(Self { storage, key, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the whole list, then persist it
    ///
    /// The in-memory list is replaced even when the write fails; the error is
    /// returned so the caller can warn that the change is not durable.
    pub fn replace(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.tasks = tasks;
        let encoded = encode_tasks(&self.tasks)?;
        if let Err(err) = self.storage.set(&self.key, &encoded) {
            warn!(key = %self.key, error = %err, "failed to persist tasks");
            return Err(err);
        }
        info!(key = %self.key, task_count = self.tasks.len(), "tasks persisted");
        Ok(())
    }
}
