//! Device — a physical dosimeter identified by its type and serial number.

use serde::{Deserialize, Serialize};

use crate::device_type::DeviceType;
use crate::error::{DoseHubError, ValidationError};
use crate::id::{DeviceId, VersionId};
use crate::version::DeviceVersion;

/// A registered dosimeter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub device_type: DeviceType,
    pub version_id: Option<VersionId>,
    pub serial_number: String,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::Validation`] when `serial_number` is blank.
    pub fn validate(&self) -> Result<(), DoseHubError> {
        if self.serial_number.trim().is_empty() {
            return Err(ValidationError::EmptySerialNumber.into());
        }
        Ok(())
    }

    /// Check that `version` may be attached to this device.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::VersionTypeMismatch`] when the version
    /// belongs to another device type.
    pub fn check_version(&self, version: &DeviceVersion) -> Result<(), DoseHubError> {
        if version.device_type != self.device_type {
            return Err(ValidationError::VersionTypeMismatch {
                version: version.version.clone(),
                expected: self.device_type.to_string(),
                actual: version.device_type.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Human-readable label: `<type>-<version>-<serial>`, or
    /// `<type>-<serial>` when no version is known.
    #[must_use]
    pub fn label(&self, version: Option<&DeviceVersion>) -> String {
        match version {
            Some(version) => format!(
                "{}-{}-{}",
                self.device_type, version.version, self.serial_number
            ),
            None => format!("{}-{}", self.device_type, self.serial_number),
        }
    }

    /// Key used to detect duplicate registrations.
    #[must_use]
    pub fn unique_key(&self) -> String {
        let version = self
            .version_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        format!("{}/{}/{}", self.device_type, version, self.serial_number)
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    device_type: Option<String>,
    version_id: Option<VersionId>,
    serial_number: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn version_id(mut self, version_id: VersionId) -> Self {
        self.version_id = Some(version_id);
        self
    }

    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::Validation`] if the device type or serial
    /// number is missing or blank.
    pub fn build(self) -> Result<Device, DoseHubError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            device_type: DeviceType::new(self.device_type.unwrap_or_default())?,
            version_id: self.version_id,
            serial_number: self.serial_number.unwrap_or_default().trim().to_string(),
        };
        device.validate()?;
        Ok(device)
    }
}
