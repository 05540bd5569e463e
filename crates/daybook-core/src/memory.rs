use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::records::{DiaryEntry, TaskPatch, TaskRecord};
use crate::repo::{DiaryRepository, StoreError, TaskRepository};

/// In-memory task repository for tests and smoke runs. Mirrors the
/// load/mutate/persist cycle of the file store without touching disk.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepo {
    inner: Arc<Mutex<Vec<TaskRecord>>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tasks)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<TaskRecord>>, StoreError> {
        self.inner.lock().map_err(|err| StoreError::Unavailable {
            reason: format!("lock poisoned: {err}"),
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepo {
    async fn list(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, task: TaskRecord) -> Result<TaskRecord, StoreError> {
        self.lock()?.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.lock()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound { id })?;
        patch.apply(task);
        Ok(task.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tasks = self.lock()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

/// In-memory diary repository for tests and smoke runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDiaryRepo {
    inner: Arc<Mutex<Vec<DiaryEntry>>>,
}

impl InMemoryDiaryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<DiaryEntry>>, StoreError> {
        self.inner.lock().map_err(|err| StoreError::Unavailable {
            reason: format!("lock poisoned: {err}"),
        })
    }
}

#[async_trait]
impl DiaryRepository for InMemoryDiaryRepo {
    async fn list(&self) -> Result<Vec<DiaryEntry>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError> {
        self.lock()?.push(entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}
