use crate::{
    error::{ApiError, ApiResult},
    model::JujuCloud,
    routes::run_blocking,
    state::AppState,
    yaml::{self, CREDENTIAL_MANIFEST},
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
        .route(
            "/credential",
            get(credentials).post(add_credential).put(update_credential),
        )
        .route(
            "/credential/{cloud}/{name}",
            get(credential_detail).delete(remove_credential),
        )
}

fn credential_manifest(cloud: &JujuCloud) -> ApiResult<String> {
    let credential = cloud
        .credential
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("cloud body carries no credential".to_string()))?;
    Ok(yaml::gen_credential_yaml(&cloud.name, credential))
}

async fn add_credential(
    State(state): State<AppState>,
    Json(cloud): Json<JujuCloud>,
) -> ApiResult<(StatusCode, String)> {
    info!("POST /credential cloud={}", cloud.name);
    let manifest = credential_manifest(&cloud)?;

    let ws = state.workspace.clone();
    let res = run_blocking(move || {
        ws.add_credential(&cloud.name, manifest.as_bytes(), CREDENTIAL_MANIFEST)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        classify(&res, OperationKind::Credential).into_body(),
    ))
}

async fn credentials(State(state): State<AppState>) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.credentials()).await?;
    Ok(classify(&res, OperationKind::Default).into_body())
}

/// The lookup probes the cloud first: a missing cloud is reported as the
/// body, and an existing cloud with an empty credential listing falls back
/// to the tool's stderr.
async fn credential_detail(
    State(state): State<AppState>,
    Path((cloud, name)): Path<(String, String)>,
) -> ApiResult<String> {
    let probe = {
        let ws = state.workspace.clone();
        let cloud = cloud.clone();
        run_blocking(move || ws.cloud_detail(&cloud)).await?
    };
    if probe.exit_code == 1 {
        return Ok(probe.stderr);
    }

    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.credential_detail(&cloud, &name)).await?;
    if res.stdout.is_empty() {
        Ok(res.stderr)
    } else {
        Ok(res.stdout)
    }
}

async fn update_credential(
    State(state): State<AppState>,
    Json(cloud): Json<JujuCloud>,
) -> ApiResult<(StatusCode, String)> {
    info!("PUT /credential cloud={}", cloud.name);
    let manifest = credential_manifest(&cloud)?;

    let ws = state.workspace.clone();
    let res = run_blocking(move || {
        ws.update_credential(&cloud.name, manifest.as_bytes(), CREDENTIAL_MANIFEST)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        classify(&res, OperationKind::Create).into_body(),
    ))
}

async fn remove_credential(
    State(state): State<AppState>,
    Path((cloud, name)): Path<(String, String)>,
) -> ApiResult<String> {
    let ws = state.workspace.clone();
    let res = run_blocking(move || ws.remove_credential(&cloud, &name)).await?;
    Ok(classify(&res, OperationKind::Create).into_body())
}
