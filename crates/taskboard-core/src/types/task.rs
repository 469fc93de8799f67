/*
[INPUT]:  Validated email addresses and worker verdicts
[OUTPUT]: Task entity, identifier and photo payload types
[POS]:    Data layer - the sole persisted entity and its wire shape
[UPDATE]: When task fields or the persisted record format change
*/

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::status::TaskStatus;

/// Opaque task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh identifier, unique within the process
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Photo attached on approval, stored as a data URI (`data:<mime>;base64,<payload>`)
///
/// The content is never inspected by board operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoData(String);

impl PhotoData {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    /// Encode raw image bytes as a base64 data URI
    pub fn from_image_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reasons a task record is structurally invalid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task id cannot be empty")]
    EmptyId,
    #[error("invalid email for task {id}: {email:?}")]
    InvalidEmail { id: String, email: String },
    #[error("task {id} is {status} but carries a photo")]
    UnexpectedPhoto { id: String, status: TaskStatus },
}

/// A unit of work identified by an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub email: String,
    pub status: TaskStatus,
    pub photo: Option<PhotoData>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a pending task for `email` with a fresh id
    pub fn new(email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::generate(),
            email: email.into(),
            status: TaskStatus::Pending,
            photo: None,
            created_at,
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if !is_email(&self.email) {
            return Err(TaskValidationError::InvalidEmail {
                id: self.id.to_string(),
                email: self.email.clone(),
            });
        }
        if self.has_photo() && self.status != TaskStatus::Approved {
            return Err(TaskValidationError::UnexpectedPhoto {
                id: self.id.to_string(),
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Bulk-add acceptance rule: any non-empty line containing `@`
pub fn is_email(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_new_task_is_pending_without_photo() {
        let task = Task::new("worker@example.com", fixed_time());
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.photo.is_none());
        assert!(!task.id.as_str().is_empty());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = Task::new("a@x.com", fixed_time());
        let b = Task::new("a@x.com", fixed_time());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_shape_matches_storage_format() {
        let task = Task {
            id: TaskId::from("17123.42"),
            email: "a@x.com".to_string(),
            status: TaskStatus::Approved,
            photo: Some(PhotoData::new("data:image/png;base64,AAA")),
            created_at: fixed_time(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], "17123.42");
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["status"], "approved");
        assert_eq!(value["photo"], "data:image/png;base64,AAA");
        assert_eq!(value["createdAt"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn test_parses_browser_written_record() {
        let raw = r#"{"id":"1714566600000.123","email":"b@x.com","status":"pending",
            "photo":null,"createdAt":"2024-05-01T12:30:00.000Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id.as_str(), "1714566600000.123");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.photo.is_none());
        assert_eq!(task.created_at, fixed_time());
    }

    #[test]
    fn test_photo_from_image_bytes() {
        let photo = PhotoData::from_image_bytes("image/png", &[0, 0, 0]);
        assert_eq!(photo.as_str(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let mut task = Task::new("no-at-sign", fixed_time());
        assert!(matches!(
            task.validate(),
            Err(TaskValidationError::InvalidEmail { .. })
        ));
        task.email = String::new();
        assert!(task.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_photo_without_approval() {
        let mut task = Task::new("a@x.com", fixed_time());
        task.photo = Some(PhotoData::new("data:,stale"));
        assert_eq!(
            task.validate(),
            Err(TaskValidationError::UnexpectedPhoto {
                id: task.id.to_string(),
                status: TaskStatus::Pending,
            })
        );

        task.status = TaskStatus::Rejected;
        assert!(task.validate().is_err());

        task.status = TaskStatus::Approved;
        assert!(task.validate().is_ok());
    }
}
