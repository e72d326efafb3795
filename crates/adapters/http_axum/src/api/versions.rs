//! JSON REST handlers for device versions.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_domain::id::VersionId;
use dosehub_domain::version::DeviceVersion;
use dosehub_domain::version_map::VersionMap;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a version.
#[derive(Deserialize)]
pub struct CreateVersionRequest {
    pub device_type: String,
    pub version: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<DeviceVersion>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/versions` — the full version map.
pub async fn map<DR, VR>(
    State(state): State<AppState<DR, VR>>,
) -> Result<Json<VersionMap>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let map = state.version_service.version_map().await?;
    Ok(Json(map))
}

/// `GET /api/versions/:id`
pub async fn get<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Path(id): Path<String>,
) -> Result<Json<DeviceVersion>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let version_id = VersionId::from_str(&id)?;
    let version = state.version_service.get_version(version_id).await?;
    Ok(Json(version))
}

/// `POST /api/versions`
pub async fn create<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Json(req): Json<CreateVersionRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let version = DeviceVersion::builder()
        .device_type(req.device_type)
        .version(req.version)
        .build()?;
    let created = state.version_service.add_version(version).await?;
    Ok(CreateResponse::Created(Json(created)))
}
