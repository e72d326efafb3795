//! Storage port — repository traits for persistence.

use std::future::Future;

use dosehub_domain::device::Device;
use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::DoseHubError;
use dosehub_domain::id::{DeviceId, VersionId};
use dosehub_domain::version::DeviceVersion;

/// Persistence for [`DeviceVersion`] records.
pub trait VersionRepository {
    /// Insert a new version.
    fn create(
        &self,
        version: DeviceVersion,
    ) -> impl Future<Output = Result<DeviceVersion, DoseHubError>> + Send;

    fn get_by_id(
        &self,
        id: VersionId,
    ) -> impl Future<Output = Result<Option<DeviceVersion>, DoseHubError>> + Send;

    /// Find the version with this exact `(device_type, version)` pair.
    fn find_by_label(
        &self,
        device_type: &DeviceType,
        version: &str,
    ) -> impl Future<Output = Result<Option<DeviceVersion>, DoseHubError>> + Send;

    /// All versions in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceVersion>, DoseHubError>> + Send;
}

/// Persistence for [`Device`] records.
pub trait DeviceRepository {
    /// Insert a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DoseHubError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DoseHubError>> + Send;

    /// Find the device registered under this type, version and serial number.
    fn find_by_serial(
        &self,
        device_type: &DeviceType,
        version_id: Option<VersionId>,
        serial_number: &str,
    ) -> impl Future<Output = Result<Option<Device>, DoseHubError>> + Send;

    /// All devices in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DoseHubError>> + Send;

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DoseHubError>> + Send;
}
