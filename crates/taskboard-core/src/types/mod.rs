/*
[INPUT]:  Task entity and status definitions
[OUTPUT]: Re-exported data model for the board
[POS]:    Data layer - module wiring
[UPDATE]: When new type modules are added
*/

pub mod status;
pub mod task;

pub use status::{TaskStatus, TransitionError};
pub use task::{PhotoData, Task, TaskId, TaskValidationError, is_email};
