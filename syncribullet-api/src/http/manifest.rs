//! Manifest and install-link endpoints

use axum::{extract::State, http::Uri, Json};
use serde::{Deserialize, Serialize};
use syncribullet_core::{
    codec::{self, ConfigBlob},
    manifest::{build_manifest, manifest_url, Manifest},
};

use super::{AppError, AppResult, AppState};

fn manifest_for(state: &AppState, blob: &ConfigBlob) -> Manifest {
    build_manifest(blob, &state.registry, state.env.as_ref(), &state.manifest_config)
}

/// `GET /manifest.json`: nothing configured yet
pub async fn get_manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(manifest_for(&state, &ConfigBlob::new()))
}

/// `GET /{config}/manifest.json`
pub async fn get_configured_manifest(State(state): State<AppState>, uri: Uri) -> Json<Manifest> {
    let segment = uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    Json(manifest_for(&state, &codec::decode(segment)))
}

#[derive(Debug, Deserialize)]
pub struct InstallLinkRequest {
    /// Host serving the add-on, with or without scheme
    pub host: String,
    #[serde(default)]
    pub config: ConfigBlob,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstallLinkResponse {
    pub url: String,
}

/// `POST /api/install-link`: deep link that installs the add-on with the
/// given settings
pub async fn create_install_link(
    Json(req): Json<InstallLinkRequest>,
) -> AppResult<Json<InstallLinkResponse>> {
    if req.host.trim().is_empty() {
        return Err(AppError::bad_request("host is required"));
    }

    let url = manifest_url(&req.host, &req.config).map_err(syncribullet_core::Error::from)?;
    Ok(Json(InstallLinkResponse { url }))
}
