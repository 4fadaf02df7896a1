use crate::{error::ApiResult, routes::run_blocking, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use juju_workspace::{classify, OperationKind};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/model", get(models))
        .route(
            "/model/{name}",
            get(model_detail).post(add_model).delete(remove_model),
        )
}

async fn add_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /model/{}", name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.add_model(&name)).await?;
    Ok((
        StatusCode::CREATED,
        classify(&res, OperationKind::Create).into_body(),
    ))
}

async fn models(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.models()).await?;
    Ok(classify(&res, OperationKind::Default).into_body())
}

async fn model_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.model_detail(&name)).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}

async fn remove_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    info!("DELETE /model/{}", name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.remove_model(&name)).await?;
    Ok(classify(&res, OperationKind::Create).into_body())
}
