//! Shared application state for axum handlers.

use std::sync::Arc;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_app::services::device_service::DeviceService;
use dosehub_app::services::version_service::VersionService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the repositories themselves do not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<DR, VR> {
    /// Device registration service.
    pub device_service: Arc<DeviceService<DR, VR>>,
    /// Version registration service and version map source.
    pub version_service: Arc<VersionService<VR>>,
}

impl<DR, VR> Clone for AppState<DR, VR> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            version_service: Arc::clone(&self.version_service),
        }
    }
}

impl<DR, VR> AppState<DR, VR>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(device_service: DeviceService<DR, VR>, version_service: VersionService<VR>) -> Self {
        Self {
            device_service: Arc::new(device_service),
            version_service: Arc::new(version_service),
        }
    }
}
