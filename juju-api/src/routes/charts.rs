use crate::{
    error::{ApiError, ApiResult},
    routes::run_blocking,
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use juju_workspace::{classify, OperationKind};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/helminstall/{name}", post(helm_install))
        .route("/helminstall2/{name}", post(helm_install_by_filename))
        .route("/helmlist", get(helm_list))
        .route("/helmuninstall/{name}", delete(helm_uninstall))
}

/// Install a chart from an uploaded archive (multipart field `file`). The
/// archive is staged into the workspace as `<name>.tgz`.
async fn helm_install(
    State(state): State<AppState>,
    Path(name): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<String> {
    info!("POST /helminstall/{}", name);

    let mut payload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            payload = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            );
        }
    }
    let payload =
        payload.ok_or_else(|| ApiError::BadRequest("missing multipart field 'file'".to_string()))?;

    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.helm_install_archive(&name, &payload)).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}

/// Install a chart from an archive already present in the workspace; the
/// request body is the filename.
async fn helm_install_by_filename(
    State(state): State<AppState>,
    Path(name): Path<String>,
    filename: String,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /helminstall2/{} file={}", name, filename);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.helm_install(&name, &filename)).await?;

    let status = if res.exit_code == 1 {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, classify(&res, OperationKind::Detail).into_body()))
}

async fn helm_list(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.helm_list()).await?;
    Ok(classify(&res, OperationKind::Detail).into_body())
}

async fn helm_uninstall(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<String> {
    info!("DELETE /helmuninstall/{}", name);
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.helm_uninstall(&name)).await?;
    Ok(classify(&res, OperationKind::Create).into_body())
}
