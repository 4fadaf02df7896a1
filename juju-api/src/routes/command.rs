use crate::{error::ApiResult, routes::run_blocking, state::AppState};
use axum::{extract::State, routing::post, Router};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new().route("/command", post(command))
}

/// Run an arbitrary command line inside the workspace directory. The body is
/// always the captured stdout, whatever the exit code.
async fn command(State(state): State<AppState>, cmd: String) -> ApiResult<String> {
    info!("POST /command: {}", cmd);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.raw(&cmd)).await?;
    Ok(res.stdout)
}
