//! Dashboard pages for devices.

use std::str::FromStr;

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_app::services::device_service::LabeledDevice;
use dosehub_domain::device::Device;
use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::DoseHubError;
use dosehub_domain::field::FieldIndex;
use dosehub_domain::id::VersionId;
use dosehub_domain::selector::versions_for;
use dosehub_domain::version_map::VersionMap;

use super::DashboardError;
use super::layout::{TypeOption, offered_types, type_options};
use crate::state::AppState;

/// Device list page template.
#[derive(Template)]
#[template(path = "device_list.html")]
pub struct DeviceListTemplate {
    devices: Vec<LabeledDevice>,
}

impl IntoResponse for DeviceListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Add-device form template.
///
/// The versions container is filled on the server for the chosen type,
/// exactly as the version selector fills it in the browser.
#[derive(Template)]
#[template(path = "device_form.html")]
pub struct DeviceFormTemplate {
    message: Option<String>,
    idx: FieldIndex,
    device_field: String,
    versions_container: String,
    version_map: String,
    types: Vec<TypeOption>,
    placeholder_selected: bool,
    versions: String,
    serial: String,
}

impl DeviceFormTemplate {
    fn new(types: &[DeviceType], map: &VersionMap, selected: Option<&str>, serial: &str) -> Self {
        let idx = FieldIndex::default();
        let versions = selected
            .and_then(|device| versions_for(map, &idx, device))
            .map(|select| select.render())
            .unwrap_or_default();
        let (types, placeholder_selected) = type_options(types, selected);

        Self {
            message: None,
            device_field: idx.device_field(),
            versions_container: idx.versions_container(),
            idx,
            version_map: serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string()),
            types,
            placeholder_selected,
            versions,
            serial: serial.to_string(),
        }
    }

    fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for DeviceFormTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /devices` — list all devices with their labels.
pub async fn list<DR, VR>(
    State(state): State<AppState<DR, VR>>,
) -> Result<DeviceListTemplate, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_labeled().await?;
    Ok(DeviceListTemplate { devices })
}

/// Query string of the add-device form.
#[derive(Default, Deserialize)]
pub struct NewDeviceQuery {
    pub device0: Option<String>,
}

/// Submitted add-device form.
#[derive(Deserialize)]
pub struct DeviceForm {
    pub device0: String,
    pub version0: Option<String>,
    pub serial: String,
}

/// Response from the add-device form handler (PRG pattern).
pub enum SubmitResponse {
    /// Registered; back to the device list.
    Redirect(Redirect),
    /// Form shown again with a message.
    Form(StatusCode, DeviceFormTemplate),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
            Self::Form(status, form) => (status, form).into_response(),
        }
    }
}

/// `GET /devices/new` — add-device form, optionally for a chosen type.
pub async fn new_form<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Query(query): Query<NewDeviceQuery>,
) -> Result<DeviceFormTemplate, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let map = state.version_service.version_map().await?;
    let types = offered_types(state.version_service.catalog(), &map);
    Ok(DeviceFormTemplate::new(
        &types,
        &map,
        query.device0.as_deref(),
        "",
    ))
}

/// `POST /devices/new` — register a device (PRG).
///
/// When the chosen type has versions but none was picked, the form comes
/// back with the version dropdown filled for that type.
pub async fn submit<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Form(form): Form<DeviceForm>,
) -> Result<SubmitResponse, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let map = state.version_service.version_map().await?;
    let types = offered_types(state.version_service.catalog(), &map);
    let retry = |status: StatusCode, message: String| -> Result<SubmitResponse, DashboardError> {
        let page = DeviceFormTemplate::new(&types, &map, Some(&form.device0), &form.serial)
            .message(message);
        Ok(SubmitResponse::Form(status, page))
    };

    let version = form
        .version0
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let has_versions = map
        .get(&form.device0)
        .is_some_and(|entries| !entries.is_empty());
    if version.is_none() && has_versions {
        return retry(StatusCode::OK, "Select a version.".to_string());
    }

    let mut builder = Device::builder()
        .device_type(form.device0.clone())
        .serial_number(form.serial.clone());
    if let Some(version) = version {
        match VersionId::from_str(version) {
            Ok(id) => builder = builder.version_id(id),
            Err(err) => return retry(StatusCode::BAD_REQUEST, err.to_string()),
        }
    }

    let result = match builder.build() {
        Ok(device) => state.device_service.add_device(device).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(device) => {
            tracing::info!(device_id = %device.id, "device registered");
            Ok(SubmitResponse::Redirect(Redirect::to("/devices")))
        }
        Err(DoseHubError::Conflict(_)) => retry(StatusCode::CONFLICT, "Already exists.".to_string()),
        Err(DoseHubError::Validation(err)) => retry(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err) => Err(err.into()),
    }
}
