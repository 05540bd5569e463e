use async_trait::async_trait;
use thiserror::Error;

use crate::records::{DiaryEntry, TaskPatch, TaskRecord};

/// Errors produced by record store implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
    /// The backing file exists but does not hold a JSON record array.
    #[error("stored data is corrupt: {reason}")]
    Corrupt { reason: String },
    /// No record carries the requested id.
    #[error("no record with id {id}")]
    NotFound { id: i64 },
    /// The caller supplied a record or patch the store refuses.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// Repository contract for the task collection. Every operation is an
/// independent load/mutate/persist cycle against the backing store; nothing
/// is cached between calls.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Full collection in insertion order, unfiltered and unsorted.
    async fn list(&self) -> Result<Vec<TaskRecord>, StoreError>;

    /// Append a record (id chosen by the caller) and return it unchanged.
    async fn create(&self, task: TaskRecord) -> Result<TaskRecord, StoreError>;

    /// Apply a partial update to the record with the given id.
    async fn update(&self, id: i64, patch: TaskPatch) -> Result<TaskRecord, StoreError>;

    /// Remove the record with the given id.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Repository contract for the diary collection. Diary entries are never
/// updated in place, only created and deleted.
#[async_trait]
pub trait DiaryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<DiaryEntry>, StoreError>;

    async fn create(&self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
