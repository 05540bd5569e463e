use std::{
    fs,
    io::Write,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use daybook_core::repo::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

/// One record collection persisted as a pretty-printed JSON array in a
/// single file. Load and save always move the whole array; saves go through
/// a temp file renamed over the target so a successful write never leaves a
/// partial file behind. There is no lock around a load/save pair — the
/// store is single-writer by design, matching its single-user deployment.
pub struct JsonCollection<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed an empty `[]` file if none exists yet. Called once at startup;
    /// afterwards a missing file is an error, not an empty collection.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        self.save(&[])
    }

    pub fn load(&self) -> Result<Vec<T>, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(unavailable)?;
        serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt {
            reason: err.to_string(),
        })
    }

    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let parent = self.path.parent().ok_or_else(|| StoreError::Unavailable {
            reason: "collection path has no parent directory".to_string(),
        })?;
        fs::create_dir_all(parent).map_err(unavailable)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(unavailable)?;
        let json = serde_json::to_vec_pretty(records).map_err(unavailable)?;
        tmp.write_all(&json).map_err(unavailable)?;
        tmp.flush().map_err(unavailable)?;
        tmp.persist(&self.path).map_err(|err| unavailable(err.error))?;
        Ok(())
    }
}

fn unavailable<E: ToString>(err: E) -> StoreError {
    StoreError::Unavailable {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::records::TaskRecord;

    #[test]
    fn missing_file_is_unavailable_not_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let collection: JsonCollection<TaskRecord> =
            JsonCollection::new(dir.path().join("tasks.json"));
        let err = collection.load().expect_err("missing file");
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[test]
    fn ensure_exists_seeds_an_empty_array_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let collection: JsonCollection<TaskRecord> = JsonCollection::new(&path);

        collection.ensure_exists().expect("seed");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
        assert!(collection.load().expect("load").is_empty());

        // A second call must not clobber existing data.
        collection
            .save(&[TaskRecord {
                id: 1,
                text: "kept".into(),
                priority: None,
                date: None,
            }])
            .expect("save");
        collection.ensure_exists().expect("noop");
        assert_eq!(collection.load().expect("load").len(), 1);
    }

    #[test]
    fn non_array_contents_are_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{\"not\": \"an array\"}").expect("write");

        let collection: JsonCollection<TaskRecord> = JsonCollection::new(&path);
        let err = collection.load().expect_err("corrupt file");
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
