use async_trait::async_trait;
use std::path::PathBuf;

use daybook_core::{
    records::DiaryEntry,
    repo::{DiaryRepository, StoreError},
};
use tracing::instrument;

use crate::json_collection::JsonCollection;

/// Diary repository backed by its own JSON-array file, sibling to the task
/// file but with an independent id space.
pub struct FileDiaryRepo {
    collection: JsonCollection<DiaryEntry>,
}

impl FileDiaryRepo {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let collection = JsonCollection::new(path);
        collection.ensure_exists()?;
        Ok(Self { collection })
    }
}

#[async_trait]
impl DiaryRepository for FileDiaryRepo {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<DiaryEntry>, StoreError> {
        self.collection.load()
    }

    #[instrument(skip(self, entry), fields(id = entry.id))]
    async fn create(&self, entry: DiaryEntry) -> Result<DiaryEntry, StoreError> {
        let mut entries = self.collection.load()?;
        entries.push(entry.clone());
        self.collection.save(&entries)?;
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut entries = self.collection.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound { id });
        }
        self.collection.save(&entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, text: &str) -> DiaryEntry {
        DiaryEntry {
            id,
            text: text.into(),
            date: Utc.with_ymd_and_hms(2026, 8, 25, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_and_delete_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileDiaryRepo::open(dir.path().join("diary.json")).expect("open");

        let created = repo.create(entry(1, "Long day")).await.expect("create");
        assert_eq!(repo.list().await.expect("list"), vec![created]);

        repo.delete(1).await.expect("delete");
        assert!(repo.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileDiaryRepo::open(dir.path().join("diary.json")).expect("open");
        repo.create(entry(1, "kept")).await.expect("create");

        let err = repo.delete(2).await.expect_err("missing id");
        assert_eq!(err, StoreError::NotFound { id: 2 });
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }
}
