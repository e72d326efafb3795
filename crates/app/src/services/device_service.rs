//! Device service — use-cases for registering dosimeters.

use dosehub_domain::device::Device;
use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::{ConflictError, DoseHubError, NotFoundError};
use dosehub_domain::id::DeviceId;

use crate::ports::{DeviceRepository, VersionRepository};

/// A device together with its display label.
#[derive(Debug, Clone)]
pub struct LabeledDevice {
    pub device: Device,
    pub label: String,
}

/// Application service for device operations.
pub struct DeviceService<DR, VR> {
    devices: DR,
    versions: VR,
    catalog: Vec<DeviceType>,
}

impl<DR, VR> DeviceService<DR, VR>
where
    DR: DeviceRepository,
    VR: VersionRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(devices: DR, versions: VR) -> Self {
        Self {
            devices,
            versions,
            catalog: Vec::new(),
        }
    }

    /// Restrict accepted device types to `catalog` (empty accepts all).
    #[must_use]
    pub fn with_catalog(mut self, catalog: Vec<DeviceType>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register a device after validating it and its version.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::Validation`] if invariants fail or the version
    /// belongs to another type, [`DoseHubError::NotFound`] when the version
    /// does not exist, [`DoseHubError::Conflict`] when the same type, version
    /// and serial number are already registered, or a storage error.
    #[tracing::instrument(skip(self, device), fields(serial = %device.serial_number))]
    pub async fn add_device(&self, device: Device) -> Result<Device, DoseHubError> {
        device.validate()?;
        device.device_type.ensure_known(&self.catalog)?;

        if let Some(version_id) = device.version_id {
            let version = self
                .versions
                .get_by_id(version_id)
                .await?
                .ok_or_else(|| NotFoundError {
                    entity: "DeviceVersion",
                    id: version_id.to_string(),
                })?;
            device.check_version(&version)?;
        }

        if self
            .devices
            .find_by_serial(&device.device_type, device.version_id, &device.serial_number)
            .await?
            .is_some()
        {
            return Err(ConflictError {
                entity: "Device",
                key: device.unique_key(),
            }
            .into());
        }
        self.devices.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DoseHubError> {
        self.devices.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, DoseHubError> {
        self.devices.get_all().await
    }

    /// List all devices with their display labels.
    ///
    /// A device whose version record has disappeared is labeled without it.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn list_labeled(&self) -> Result<Vec<LabeledDevice>, DoseHubError> {
        let versions = self.versions.get_all().await?;
        let devices = self.devices.get_all().await?;

        Ok(devices
            .into_iter()
            .map(|device| {
                let version = device
                    .version_id
                    .and_then(|id| versions.iter().find(|v| v.id == id));
                let label = device.label(version);
                LabeledDevice { device, label }
            })
            .collect())
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DoseHubError> {
        self.devices.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosehub_domain::error::ValidationError;
    use dosehub_domain::id::VersionId;
    use dosehub_domain::version::DeviceVersion;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryDeviceRepo {
        store: Mutex<Vec<Device>>,
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn create(&self, device: Device) -> impl Future<Output = Result<Device, DoseHubError>> + Send {
            self.store.lock().unwrap().push(device.clone());
            async { Ok(device) }
        }

        fn get_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, DoseHubError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|d| d.id == id).cloned();
            async { Ok(result) }
        }

        fn find_by_serial(
            &self,
            device_type: &DeviceType,
            version_id: Option<VersionId>,
            serial_number: &str,
        ) -> impl Future<Output = Result<Option<Device>, DoseHubError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store
                .iter()
                .find(|d| {
                    &d.device_type == device_type
                        && d.version_id == version_id
                        && d.serial_number == serial_number
                })
                .cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DoseHubError>> + Send {
            let result = self.store.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DoseHubError>> + Send {
            self.store.lock().unwrap().retain(|d| d.id != id);
            async { Ok(()) }
        }
    }

    #[derive(Default)]
    struct FixedVersionRepo {
        versions: Vec<DeviceVersion>,
    }

    impl VersionRepository for FixedVersionRepo {
        fn create(
            &self,
            version: DeviceVersion,
        ) -> impl Future<Output = Result<DeviceVersion, DoseHubError>> + Send {
            async { Ok(version) }
        }

        fn get_by_id(
            &self,
            id: VersionId,
        ) -> impl Future<Output = Result<Option<DeviceVersion>, DoseHubError>> + Send {
            let result = self.versions.iter().find(|v| v.id == id).cloned();
            async { Ok(result) }
        }

        fn find_by_label(
            &self,
            _device_type: &DeviceType,
            _version: &str,
        ) -> impl Future<Output = Result<Option<DeviceVersion>, DoseHubError>> + Send {
            async { Ok(None) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceVersion>, DoseHubError>> + Send {
            let result = self.versions.clone();
            async { Ok(result) }
        }
    }

    fn hawk_21() -> DeviceVersion {
        DeviceVersion::builder()
            .device_type("Hawk")
            .version("2.1")
            .build()
            .unwrap()
    }

    fn make_service(
        versions: Vec<DeviceVersion>,
    ) -> DeviceService<InMemoryDeviceRepo, FixedVersionRepo> {
        DeviceService::new(InMemoryDeviceRepo::default(), FixedVersionRepo { versions })
    }

    fn hawk(version: Option<VersionId>, serial: &str) -> Device {
        let mut builder = Device::builder().device_type("Hawk").serial_number(serial);
        if let Some(id) = version {
            builder = builder.version_id(id);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn should_add_device_with_known_version() {
        let version = hawk_21();
        let svc = make_service(vec![version.clone()]);

        let created = svc.add_device(hawk(Some(version.id), "0007")).await.unwrap();

        let fetched = svc.get_device(created.id).await.unwrap();
        assert_eq!(fetched.version_id, Some(version.id));
    }

    #[tokio::test]
    async fn should_reject_unknown_version() {
        let svc = make_service(vec![]);
        let result = svc.add_device(hawk(Some(VersionId::new()), "0007")).await;
        assert!(matches!(result, Err(DoseHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_version_of_other_type() {
        let version = hawk_21();
        let svc = make_service(vec![version.clone()]);
        let device = Device::builder()
            .device_type("Liulin")
            .version_id(version.id)
            .serial_number("L1")
            .build()
            .unwrap();

        let result = svc.add_device(device).await;
        assert!(matches!(
            result,
            Err(DoseHubError::Validation(
                ValidationError::VersionTypeMismatch { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn should_reject_duplicate_registration() {
        let version = hawk_21();
        let svc = make_service(vec![version.clone()]);
        svc.add_device(hawk(Some(version.id), "0007")).await.unwrap();

        let result = svc.add_device(hawk(Some(version.id), "0007")).await;
        assert!(matches!(result, Err(DoseHubError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_accept_same_serial_without_version() {
        let version = hawk_21();
        let svc = make_service(vec![version.clone()]);
        svc.add_device(hawk(Some(version.id), "0007")).await.unwrap();
        svc.add_device(hawk(None, "0007")).await.unwrap();

        assert_eq!(svc.list_devices().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_reject_type_outside_catalog() {
        let svc = make_service(vec![]).with_catalog(vec![DeviceType::new("EPDN2").unwrap()]);
        let result = svc.add_device(hawk(None, "1")).await;
        assert!(matches!(
            result,
            Err(DoseHubError::Validation(ValidationError::UnknownDeviceType(_)))
        ));
    }

    #[tokio::test]
    async fn should_label_devices_with_their_version() {
        let version = hawk_21();
        let svc = make_service(vec![version.clone()]);
        svc.add_device(hawk(Some(version.id), "0007")).await.unwrap();
        svc.add_device(hawk(None, "0008")).await.unwrap();

        let labels: Vec<String> = svc
            .list_labeled()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.label)
            .collect();
        assert_eq!(labels, ["Hawk-2.1-0007", "Hawk-0008"]);
    }

    #[tokio::test]
    async fn should_delete_device() {
        let svc = make_service(vec![]);
        let created = svc.add_device(hawk(None, "0009")).await.unwrap();

        svc.delete_device(created.id).await.unwrap();

        let result = svc.get_device(created.id).await;
        assert!(matches!(result, Err(DoseHubError::NotFound(_))));
    }
}
