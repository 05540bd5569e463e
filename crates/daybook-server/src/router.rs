use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{
        create_diary, create_task, delete_diary, delete_task, list_diary, list_tasks, update_task,
    },
    AppState,
};

/// Full route table. The browser client is served from elsewhere, so CORS
/// stays permissive, as in a single-user local deployment.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/diary", get(list_diary).post(create_diary))
        .route("/diary/{id}", delete(delete_diary))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
