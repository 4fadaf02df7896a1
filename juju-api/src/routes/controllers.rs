use crate::{error::ApiResult, model::JujuMetadata, routes::run_blocking, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use juju_workspace::{classify, OperationKind};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metadata", post(generate_metadata))
        .route("/controller", get(controllers))
        // POST takes the cloud name in the path; the controller name rides
        // in the metadata body.
        .route(
            "/controller/{name}",
            post(add_controller).get(controller_detail).delete(remove_controller),
        )
}

async fn generate_metadata(
    State(state): State<AppState>,
    Json(meta): Json<JujuMetadata>,
) -> ApiResult<String> {
    info!("POST /metadata image={}", meta.image_id);
    let ws = state.workspace.clone();
    let res = run_blocking(move || {
        ws.generate_metadata(
            &meta.path,
            &meta.image_id,
            &meta.os_series,
            &meta.region_name,
            &meta.os_auth_url,
        )
    })
    .await?;
    Ok(classify(&res, OperationKind::Default).into_body())
}

async fn add_controller(
    State(state): State<AppState>,
    Path(cloud): Path<String>,
    Json(meta): Json<JujuMetadata>,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /controller/{}", cloud);
    let spec = meta.to_controller_spec();

    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.add_controller(&cloud, &spec)).await?;

    Ok((
        StatusCode::CREATED,
        classify(&res, OperationKind::Create).into_body(),
    ))
}

async fn controllers(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.controllers()).await?;
    Ok(classify(&res, OperationKind::Default).into_body())
}

async fn controller_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.controller_detail(&name)).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}

async fn remove_controller(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    info!("DELETE /controller/{}", name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.remove_controller(&name)).await?;
    Ok(classify(&res, OperationKind::Create).into_body())
}
