//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_domain::device::Device;
use dosehub_domain::id::{DeviceId, VersionId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub device_type: String,
    pub version_id: Option<String>,
    pub serial_number: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DR, VR>(
    State(state): State<AppState<DR, VR>>,
) -> Result<Json<Vec<Device>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(Json(devices))
}

/// `GET /api/devices/:id`
pub async fn get<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(Json(device))
}

/// `POST /api/devices`
pub async fn create<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let version_id = req
        .version_id
        .filter(|s| !s.trim().is_empty())
        .map(|s| VersionId::from_str(&s))
        .transpose()?;

    let mut builder = Device::builder()
        .device_type(req.device_type)
        .serial_number(req.serial_number);
    if let Some(version_id) = version_id {
        builder = builder.version_id(version_id);
    }

    let device = builder.build()?;
    let created = state.device_service.add_device(device).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/devices/:id`
pub async fn delete<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}
