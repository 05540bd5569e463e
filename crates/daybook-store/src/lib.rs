//! Flat-file record store: each collection is one JSON array on disk,
//! re-read and rewritten in full on every operation. The file is the sole
//! source of truth; nothing is cached across calls.

pub mod diary_repo;
pub mod json_collection;
pub mod task_repo;

pub use diary_repo::FileDiaryRepo;
pub use task_repo::FileTaskRepo;
