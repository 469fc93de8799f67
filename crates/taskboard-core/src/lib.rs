/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public taskboard-core crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod admin;
pub mod error;
pub mod store;
pub mod types;
pub mod worker;

pub use admin::{BulkAdd, Export, StatusCounts};
pub use error::{OperationError, Result, StoreError};
pub use store::{
    CorruptDataPolicy, DEFAULT_STORAGE_KEY, DurableStorage, FileStorage, MemoryStorage, TaskStore,
};
pub use types::*;
pub use worker::{StatusChange, TransitionOutcome};
