//! Dashboard pages for device versions.

use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::DoseHubError;
use dosehub_domain::version::DeviceVersion;
use dosehub_domain::version_map::VersionMap;

use super::DashboardError;
use super::layout::{TypeOption, type_options};
use crate::state::AppState;

/// Versions of one device type, in registration order.
pub struct VersionGroup {
    pub device_type: String,
    pub labels: Vec<String>,
}

fn groups(map: &VersionMap) -> Vec<VersionGroup> {
    map.device_types()
        .map(|kind| VersionGroup {
            device_type: kind.to_string(),
            labels: map
                .get(kind.as_str())
                .unwrap_or_default()
                .iter()
                .map(|entry| entry.label.clone())
                .collect(),
        })
        .collect()
}

/// Version list page template.
#[derive(Template)]
#[template(path = "version_list.html")]
pub struct VersionListTemplate {
    groups: Vec<VersionGroup>,
}

impl IntoResponse for VersionListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Add-version form template. Without a catalog the device type is typed in.
#[derive(Template)]
#[template(path = "version_form.html")]
pub struct VersionFormTemplate {
    message: Option<String>,
    types: Vec<TypeOption>,
    placeholder_selected: bool,
    device: String,
    version: String,
}

impl VersionFormTemplate {
    fn new(catalog: &[DeviceType], device: Option<&str>, version: &str) -> Self {
        let (types, placeholder_selected) = type_options(catalog, device);
        Self {
            message: None,
            types,
            placeholder_selected,
            device: device.unwrap_or_default().to_string(),
            version: version.to_string(),
        }
    }
}

impl IntoResponse for VersionFormTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /versions` — versions grouped by device type.
pub async fn list<DR, VR>(
    State(state): State<AppState<DR, VR>>,
) -> Result<VersionListTemplate, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let map = state.version_service.version_map().await?;
    Ok(VersionListTemplate {
        groups: groups(&map),
    })
}

/// Submitted add-version form.
#[derive(Deserialize)]
pub struct VersionForm {
    pub device: String,
    pub version: String,
}

/// Response from the add-version form handler (PRG pattern).
pub enum SubmitResponse {
    Redirect(Redirect),
    Form(StatusCode, VersionFormTemplate),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
            Self::Form(status, form) => (status, form).into_response(),
        }
    }
}

/// `GET /versions/new` — add-version form.
pub async fn new_form<DR, VR>(State(state): State<AppState<DR, VR>>) -> VersionFormTemplate
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    VersionFormTemplate::new(state.version_service.catalog(), None, "")
}

/// `POST /versions/new` — register a version (PRG).
pub async fn submit<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Form(form): Form<VersionForm>,
) -> Result<SubmitResponse, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let result = match DeviceVersion::builder()
        .device_type(form.device.clone())
        .version(form.version.clone())
        .build()
    {
        Ok(version) => state.version_service.add_version(version).await,
        Err(err) => Err(err),
    };

    let (status, message) = match result {
        Ok(version) => {
            tracing::info!(version = %version, "version registered");
            return Ok(SubmitResponse::Redirect(Redirect::to("/versions")));
        }
        Err(DoseHubError::Conflict(_)) => (StatusCode::CONFLICT, "Already exists.".to_string()),
        Err(DoseHubError::Validation(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
        Err(err) => return Err(err.into()),
    };

    let mut page = VersionFormTemplate::new(
        state.version_service.catalog(),
        Some(&form.device),
        &form.version,
    );
    page.message = Some(message);
    Ok(SubmitResponse::Form(status, page))
}
