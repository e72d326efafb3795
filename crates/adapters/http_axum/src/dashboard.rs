//! Server-side rendered HTML pages.
//!
//! Every page works without JavaScript; the add-device page additionally
//! refreshes its version dropdown in the browser when the device changes.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod fragments;
pub mod home;
pub mod layout;
#[allow(clippy::missing_errors_doc)]
pub mod versions;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_domain::error::DoseHubError;

use crate::error::classify;
use crate::state::AppState;
use layout::ErrorTemplate;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<DR, VR>() -> Router<AppState<DR, VR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<DR, VR>))
        .route("/devices", get(devices::list::<DR, VR>))
        .route(
            "/devices/new",
            get(devices::new_form::<DR, VR>).post(devices::submit::<DR, VR>),
        )
        .route("/versions", get(versions::list::<DR, VR>))
        .route(
            "/versions/new",
            get(versions::new_form::<DR, VR>).post(versions::submit::<DR, VR>),
        )
        .route("/fragments/versions", get(fragments::versions::<DR, VR>))
}

/// Error page shown when a dashboard handler fails.
pub struct DashboardError(DoseHubError);

impl From<DoseHubError> for DashboardError {
    fn from(err: DoseHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        ErrorTemplate { status, message }.into_response()
    }
}
