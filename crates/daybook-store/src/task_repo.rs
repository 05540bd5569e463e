use async_trait::async_trait;
use std::path::PathBuf;

use daybook_core::{
    records::{TaskPatch, TaskRecord},
    repo::{StoreError, TaskRepository},
};
use tracing::instrument;

use crate::json_collection::JsonCollection;

/// Task repository backed by a single JSON-array file. Every operation is
/// its own read-modify-write cycle against that file.
pub struct FileTaskRepo {
    collection: JsonCollection<TaskRecord>,
}

impl FileTaskRepo {
    /// Open the repository, seeding an empty collection file if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let collection = JsonCollection::new(path);
        collection.ensure_exists()?;
        Ok(Self { collection })
    }
}

#[async_trait]
impl TaskRepository for FileTaskRepo {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<TaskRecord>, StoreError> {
        self.collection.load()
    }

    #[instrument(skip(self, task), fields(id = task.id))]
    async fn create(&self, task: TaskRecord) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.collection.load()?;
        tasks.push(task.clone());
        self.collection.save(&tasks)?;
        Ok(task)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i64, patch: TaskPatch) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.collection.load()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound { id })?;
        patch.apply(task);
        let updated = task.clone();
        self.collection.save(&tasks)?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tasks = self.collection.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound { id });
        }
        self.collection.save(&tasks)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::records::Priority;

    fn task(id: i64, text: &str, priority: Option<Priority>) -> TaskRecord {
        TaskRecord {
            id,
            text: text.into(),
            priority,
            date: None,
        }
    }

    fn open_repo(dir: &tempfile::TempDir) -> FileTaskRepo {
        FileTaskRepo::open(dir.path().join("tasks.json")).expect("open")
    }

    #[tokio::test]
    async fn created_task_is_listed_by_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir);

        let created = repo
            .create(task(1, "Buy milk", Some(Priority::High)))
            .await
            .expect("create");
        let listed = repo.list().await.expect("list");
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir);

        repo.create(task(1, "first", Some(Priority::Low)))
            .await
            .expect("create");
        repo.create(task(2, "second", Some(Priority::High)))
            .await
            .expect("create");

        let ids: Vec<i64> = repo.list().await.expect("list").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn update_changes_only_the_targeted_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir);
        repo.create(task(1, "a", Some(Priority::Low))).await.expect("create");
        repo.create(task(2, "b", None)).await.expect("create");

        let updated = repo
            .update(
                1,
                TaskPatch {
                    text: Some("a2".into()),
                    priority: Some(Priority::High),
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.text, "a2");
        assert_eq!(updated.priority, Some(Priority::High));

        let listed = repo.list().await.expect("list");
        assert_eq!(listed[0], updated);
        assert_eq!(listed[1], task(2, "b", None));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir);
        repo.create(task(1, "a", None)).await.expect("create");
        let before = repo.list().await.expect("list");

        let err = repo
            .update(99, TaskPatch::default())
            .await
            .expect_err("missing id");
        assert_eq!(err, StoreError::NotFound { id: 99 });
        assert_eq!(repo.list().await.expect("list"), before);
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found_and_keeps_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir);
        repo.create(task(1, "a", None)).await.expect("create");

        let err = repo.delete(99).await.expect_err("missing id");
        assert_eq!(err, StoreError::NotFound { id: 99 });
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn create_update_delete_cycle_restores_prior_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir);
        repo.create(task(1, "kept", Some(Priority::Medium)))
            .await
            .expect("create");
        let before = repo.list().await.expect("list");

        repo.create(task(2, "temp", Some(Priority::High)))
            .await
            .expect("create");
        repo.update(
            2,
            TaskPatch {
                text: Some("temp edited".into()),
                priority: None,
            },
        )
        .await
        .expect("update");
        repo.delete(2).await.expect("delete");

        assert_eq!(repo.list().await.expect("list"), before);
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_as_corrupt_on_every_operation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let repo = FileTaskRepo::open(&path).expect("open");
        std::fs::write(&path, "not json").expect("write");

        let err = repo.list().await.expect_err("corrupt");
        assert!(matches!(err, StoreError::Corrupt { .. }));
        let err = repo.create(task(1, "a", None)).await.expect_err("corrupt");
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
