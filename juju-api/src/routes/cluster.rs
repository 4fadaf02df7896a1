use crate::{error::ApiResult, routes::run_blocking, state::AppState};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use juju_workspace::{classify, OperationKind, K8S_CONTROL_PLANE_UNIT};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/isk8sready", get(is_k8s_ready))
        .route("/kubeconfig", get(kube_config).post(save_kube_config))
}

async fn status(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.status()).await?;
    Ok(classify(&res, OperationKind::Default).into_body())
}

/// Boolean readiness probe; stdout/stderr are never exposed.
async fn is_k8s_ready(State(state): State<AppState>) -> ApiResult<Json<bool>> {
    let ws = state.workspace.clone();
    let ready = tokio::task::spawn_blocking(move || ws.is_k8s_ready())
        .await
        .unwrap_or(false);
    Ok(Json(ready))
}

async fn kube_config(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.kube_config(K8S_CONTROL_PLANE_UNIT)).await?;
    Ok(res.stdout)
}

/// Fetch the kubeconfig and persist it under the caller-supplied filename.
async fn save_kube_config(
    State(state): State<AppState>,
    filename: String,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /kubeconfig -> {}", filename);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.kube_config(K8S_CONTROL_PLANE_UNIT)).await?;

    if let Err(e) = tokio::fs::write(&filename, &res.stdout).await {
        return Ok((StatusCode::OK, e.to_string()));
    }

    if res.exit_code == 1 {
        Ok((StatusCode::OK, res.stderr))
    } else {
        Ok((StatusCode::CREATED, res.stdout))
    }
}
