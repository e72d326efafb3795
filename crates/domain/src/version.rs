//! Device version — a firmware/hardware revision of a device type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device_type::DeviceType;
use crate::error::{DoseHubError, ValidationError};
use crate::id::VersionId;

/// A selectable version of a device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceVersion {
    pub id: VersionId,
    pub device_type: DeviceType,
    pub version: String,
}

impl DeviceVersion {
    /// Create a builder for constructing a [`DeviceVersion`].
    #[must_use]
    pub fn builder() -> DeviceVersionBuilder {
        DeviceVersionBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::Validation`] when `version` is blank.
    pub fn validate(&self) -> Result<(), DoseHubError> {
        if self.version.trim().is_empty() {
            return Err(ValidationError::EmptyVersion.into());
        }
        Ok(())
    }
}

impl fmt::Display for DeviceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.device_type, self.version)
    }
}

/// Step-by-step builder for [`DeviceVersion`].
#[derive(Debug, Default)]
pub struct DeviceVersionBuilder {
    id: Option<VersionId>,
    device_type: Option<String>,
    version: Option<String>,
}

impl DeviceVersionBuilder {
    #[must_use]
    pub fn id(mut self, id: VersionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Consume the builder, validate, and return a [`DeviceVersion`].
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::Validation`] if the device type or the
    /// version label is missing or blank.
    pub fn build(self) -> Result<DeviceVersion, DoseHubError> {
        let device_type = DeviceType::new(self.device_type.unwrap_or_default())?;
        let version = DeviceVersion {
            id: self.id.unwrap_or_default(),
            device_type,
            version: self.version.unwrap_or_default().trim().to_string(),
        };
        version.validate()?;
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_version() {
        let version = DeviceVersion::builder()
            .device_type("Hawk")
            .version(" 2.1 ")
            .build()
            .unwrap();
        assert_eq!(version.device_type.as_str(), "Hawk");
        assert_eq!(version.version, "2.1");
    }

    #[test]
    fn should_reject_missing_device_type() {
        let result = DeviceVersion::builder().version("1.0").build();
        assert!(matches!(
            result,
            Err(DoseHubError::Validation(ValidationError::EmptyDeviceType))
        ));
    }

    #[test]
    fn should_reject_blank_version() {
        let result = DeviceVersion::builder()
            .device_type("Liulin")
            .version("  ")
            .build();
        assert!(matches!(
            result,
            Err(DoseHubError::Validation(ValidationError::EmptyVersion))
        ));
    }

    #[test]
    fn should_display_type_and_version() {
        let version = DeviceVersion::builder()
            .device_type("EPDN2")
            .version("3")
            .build()
            .unwrap();
        assert_eq!(version.to_string(), "EPDN2-3");
    }
}
