//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod versions;

use axum::Router;
use axum::routing::get;

use dosehub_app::ports::{DeviceRepository, VersionRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, VR>() -> Router<AppState<DR, VR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    Router::new()
        // Versions
        .route(
            "/versions",
            get(versions::map::<DR, VR>).post(versions::create::<DR, VR>),
        )
        .route("/versions/{id}", get(versions::get::<DR, VR>))
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, VR>).post(devices::create::<DR, VR>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DR, VR>).delete(devices::delete::<DR, VR>),
        )
}
