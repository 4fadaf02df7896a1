use crate::{error::ApiResult, routes::run_blocking, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use juju_workspace::{classify, OperationKind};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/application/{charm}/{name}", post(deploy_application))
        .route(
            "/application/{name}",
            get(application_detail).delete(remove_application),
        )
}

async fn deploy_application(
    State(state): State<AppState>,
    Path((charm, name)): Path<(String, String)>,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /application/{}/{}", charm, name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.deploy_application(&charm, &name)).await?;
    Ok((
        StatusCode::CREATED,
        classify(&res, OperationKind::Create).into_body(),
    ))
}

async fn application_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.application_detail(&name)).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}

async fn remove_application(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    info!("DELETE /application/{}", name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.remove_application(&name)).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}
