//! Device type — the key identifying a product line of dosimeters.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Validated, trimmed, non-empty device type key (e.g. `EPDN2`, `Liulin`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceType(String);

impl DeviceType {
    /// Validate and wrap a device type key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceType`] when `value` is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyDeviceType);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check this type against a catalog of known types.
    ///
    /// An empty catalog accepts every type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownDeviceType`] when the catalog is
    /// non-empty and does not list this type.
    pub fn ensure_known(&self, catalog: &[DeviceType]) -> Result<(), ValidationError> {
        if catalog.is_empty() || catalog.contains(self) {
            Ok(())
        } else {
            Err(ValidationError::UnknownDeviceType(self.0.clone()))
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceType> for String {
    fn from(value: DeviceType) -> Self {
        value.0
    }
}

impl Borrow<str> for DeviceType {
    fn borrow(&self) -> &str {
        &self.0
    }
}
