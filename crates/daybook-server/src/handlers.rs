use axum::{
    extract::{Path, State},
    Json,
};
use daybook_core::{
    records::{DiaryEntry, Priority, TaskPatch, TaskRecord},
    repo::StoreError,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TaskCreated {
    pub message: String,
    pub task: TaskRecord,
}

#[derive(Debug, Serialize)]
pub struct EntryCreated {
    pub message: String,
    pub entry: DiaryEntry,
}

/// PUT body. Fields arrive as plain strings so a missing field or an
/// out-of-enum priority yields a 400 with a store-style message rather than
/// a serde rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub text: Option<String>,
    pub priority: Option<String>,
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskRecord>>, ApiError> {
    Ok(Json(state.tasks.list().await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(task): Json<TaskRecord>,
) -> Result<Json<TaskCreated>, ApiError> {
    require_text(&task.text)?;
    let task = state.tasks.create(task).await?;
    Ok(Json(TaskCreated {
        message: "Task added".to_string(),
        task,
    }))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<TaskRecord>, ApiError> {
    let text = body.text.ok_or_else(|| missing_field("text"))?;
    require_text(&text)?;
    let priority = body
        .priority
        .ok_or_else(|| missing_field("priority"))?
        .parse::<Priority>()
        .map_err(|err| StoreError::InvalidInput {
            reason: err.to_string(),
        })?;

    let patch = TaskPatch {
        text: Some(text),
        priority: Some(priority),
    };
    Ok(Json(state.tasks.update(id, patch).await?))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    state.tasks.delete(id).await?;
    Ok(Json(Message {
        message: "Task deleted".to_string(),
    }))
}

pub async fn list_diary(State(state): State<AppState>) -> Result<Json<Vec<DiaryEntry>>, ApiError> {
    Ok(Json(state.diary.list().await?))
}

pub async fn create_diary(
    State(state): State<AppState>,
    Json(entry): Json<DiaryEntry>,
) -> Result<Json<EntryCreated>, ApiError> {
    require_text(&entry.text)?;
    let entry = state.diary.create(entry).await?;
    Ok(Json(EntryCreated {
        message: "Diary entry added".to_string(),
        entry,
    }))
}

pub async fn delete_diary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    state.diary.delete(id).await?;
    Ok(Json(Message {
        message: "Diary entry deleted".to_string(),
    }))
}

// Validation is uniform across every mutating route; the store itself does
// not inspect records.
fn require_text(text: &str) -> Result<(), StoreError> {
    if text.trim().is_empty() {
        return Err(StoreError::InvalidInput {
            reason: "text must not be empty".to_string(),
        });
    }
    Ok(())
}

fn missing_field(name: &str) -> StoreError {
    StoreError::InvalidInput {
        reason: format!("missing field: {name}"),
    }
}
