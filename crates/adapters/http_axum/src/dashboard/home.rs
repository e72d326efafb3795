//! Dashboard home page — overview of the registry.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use dosehub_app::ports::{DeviceRepository, VersionRepository};

use super::DashboardError;
use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    device_count: usize,
    version_count: usize,
    type_count: usize,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — registry overview.
///
/// # Errors
///
/// Fails when the repositories cannot be read.
pub async fn index<DR, VR>(
    State(state): State<AppState<DR, VR>>,
) -> Result<HomeTemplate, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    let versions = state.version_service.list_versions().await?;
    let map = state.version_service.version_map().await?;

    Ok(HomeTemplate {
        device_count: devices.len(),
        version_count: versions.len(),
        type_count: map.len(),
    })
}
