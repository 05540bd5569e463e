use color_eyre::Result;
use daybook_core::records::{DiaryEntry, Priority, TaskRecord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Thin typed client for the daybook HTTP surface. One method per route;
/// non-2xx responses surface as errors, nothing is retried.
pub struct ApiClient {
    base: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TaskCreated {
    #[allow(dead_code)]
    message: String,
    task: TaskRecord,
}

#[derive(Debug, Deserialize)]
struct EntryCreated {
    #[allow(dead_code)]
    message: String,
    entry: DiaryEntry,
}

#[derive(Debug, Serialize)]
struct UpdateTaskBody {
    text: String,
    priority: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let tasks = self
            .client
            .get(self.url("/tasks"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(id = task.id))]
    pub async fn create_task(&self, task: &TaskRecord) -> Result<TaskRecord> {
        let created: TaskCreated = self
            .client
            .post(self.url("/tasks"))
            .json(task)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created.task)
    }

    #[instrument(skip(self, text))]
    pub async fn update_task(&self, id: i64, text: &str, priority: Priority) -> Result<TaskRecord> {
        let body = UpdateTaskBody {
            text: text.to_string(),
            priority: priority.to_string(),
        };
        let updated = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_diary(&self) -> Result<Vec<DiaryEntry>> {
        let entries = self
            .client
            .get(self.url("/diary"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(entries)
    }

    #[instrument(skip(self, entry), fields(id = entry.id))]
    pub async fn create_diary(&self, entry: &DiaryEntry) -> Result<DiaryEntry> {
        let created: EntryCreated = self
            .client
            .post(self.url("/diary"))
            .json(entry)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created.entry)
    }

    #[instrument(skip(self))]
    pub async fn delete_diary(&self, id: i64) -> Result<()> {
        self.client
            .delete(self.url(&format!("/diary/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
