pub mod applications;
pub mod charts;
pub mod clouds;
pub mod cluster;
pub mod command;
pub mod controllers;
pub mod credentials;
pub mod health;
pub mod models;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::Router;
use juju_workspace::Workspace;
use tower_http::trace::TraceLayer;

pub fn create_app(workspace: Workspace) -> Router {
    let state = AppState::new(workspace);

    Router::new()
        .merge(health::routes())
        .merge(clouds::routes())
        .merge(credentials::routes())
        .merge(controllers::routes())
        .merge(models::routes())
        .merge(applications::routes())
        .merge(cluster::routes())
        .merge(charts::routes())
        .merge(command::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Engine calls block on subprocess completion, so they run off the async
/// runtime's worker threads.
pub(crate) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> juju_workspace::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Engine task failed: {}", e)))?
        .map_err(ApiError::from)
}
