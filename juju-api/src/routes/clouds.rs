use crate::{
    error::ApiResult,
    model::JujuCloud,
    routes::run_blocking,
    state::AppState,
    yaml::{self, CLOUD_MANIFEST},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use juju_workspace::{classify, OperationKind};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cloud", get(clouds).post(add_cloud))
        .route("/cloud/{name}", get(cloud_detail).delete(remove_cloud))
}

async fn add_cloud(
    State(state): State<AppState>,
    Json(cloud): Json<JujuCloud>,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /cloud name={}", cloud.name);
    let manifest = yaml::gen_cloud_yaml(&cloud);

    let ws = state.workspace.clone();
    let res =
        run_blocking(move || ws.add_cloud(&cloud.name, manifest.as_bytes(), CLOUD_MANIFEST)).await?;

    Ok((
        StatusCode::CREATED,
        classify(&res, OperationKind::Create).into_body(),
    ))
}

async fn clouds(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.clouds()).await?;
    Ok(classify(&res, OperationKind::Default).into_body())
}

async fn cloud_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.cloud_detail(&name)).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}

async fn remove_cloud(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    info!("DELETE /cloud/{}", name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.remove_cloud(&name)).await?;
    Ok(classify(&res, OperationKind::Create).into_body())
}
