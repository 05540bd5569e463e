//! HTTP surface for the record store: one route per CRUD operation, JSON
//! bodies in and out, store errors mapped onto status codes.

pub mod error;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use daybook_core::repo::{DiaryRepository, TaskRepository};
use tracing::info;

/// Shared handler dependencies: one repository per collection.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskRepository>,
    pub diary: Arc<dyn DiaryRepository>,
}

impl AppState {
    pub fn new(tasks: Arc<dyn TaskRepository>, diary: Arc<dyn DiaryRepository>) -> Self {
        Self { tasks, diary }
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "daybook server listening");
    axum::serve(listener, router::router(state)).await?;
    Ok(())
}
