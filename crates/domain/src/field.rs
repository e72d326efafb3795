//! Form field naming for repeated device/version rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of one device/version row in a form.
///
/// The device control of row `idx` is `device{idx}`, its version container
/// is `versions{idx}` and the produced version control is `version{idx}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldIndex(String);

impl FieldIndex {
    #[must_use]
    pub fn new(idx: impl Into<String>) -> Self {
        Self(idx.into())
    }

    /// Id of the control holding the selected device type.
    #[must_use]
    pub fn device_field(&self) -> String {
        format!("device{}", self.0)
    }

    /// Id of the element whose content is replaced by the version control.
    #[must_use]
    pub fn versions_container(&self) -> String {
        format!("versions{}", self.0)
    }

    /// Name of the produced version control.
    #[must_use]
    pub fn version_field(&self) -> String {
        format!("version{}", self.0)
    }
}

impl Default for FieldIndex {
    fn default() -> Self {
        Self::from(0)
    }
}

impl From<usize> for FieldIndex {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for FieldIndex {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FieldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
