//! Version map — the read-only device type → versions lookup table handed
//! to forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::device_type::DeviceType;
use crate::version::DeviceVersion;

/// One selectable version: the option value and its displayed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub value: String,
    pub label: String,
}

impl VersionEntry {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&DeviceVersion> for VersionEntry {
    fn from(version: &DeviceVersion) -> Self {
        Self::new(version.id.to_string(), version.version.clone())
    }
}

// Entries travel as `[id, label]` pairs; ids may be strings or numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl Serialize for VersionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.value, &self.label).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VersionEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (value, label): (RawValue, String) = Deserialize::deserialize(deserializer)?;
        let value = match value {
            RawValue::Text(text) => text,
            RawValue::Number(number) => number.to_string(),
        };
        Ok(Self { value, label })
    }
}

/// Immutable mapping from [`DeviceType`] to its versions in display order.
///
/// There is no way to mutate a map once built; rebuild it instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionMap(BTreeMap<DeviceType, Vec<VersionEntry>>);

// Keys are trimmed into device types; two keys that only differ by
// surrounding whitespace are refused instead of merged.
impl<'de> Deserialize<'de> for VersionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<VersionEntry>>::deserialize(deserializer)?;
        let mut inner = BTreeMap::new();
        for (key, entries) in raw {
            let device_type = DeviceType::new(&key).map_err(de::Error::custom)?;
            if inner.contains_key(&device_type) {
                return Err(de::Error::custom(format_args!(
                    "duplicate device type `{device_type}`"
                )));
            }
            inner.insert(device_type, entries);
        }
        Ok(Self(inner))
    }
}

impl VersionMap {
    /// Group stored versions by device type, keeping the iteration order
    /// within each group.
    pub fn from_versions<'a>(versions: impl IntoIterator<Item = &'a DeviceVersion>) -> Self {
        versions
            .into_iter()
            .map(|version| (version.device_type.clone(), VersionEntry::from(version)))
            .collect()
    }

    /// Parse the `{ "<type>": [[id, "label"], ...] }` JSON form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document is malformed, a key
    /// is blank, or two keys name the same device type once trimmed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Versions registered for exactly `device_type`, or `None` when the key
    /// is unknown. Known keys may map to an empty slice.
    #[must_use]
    pub fn get(&self, device_type: &str) -> Option<&[VersionEntry]> {
        self.0.get(device_type).map(Vec::as_slice)
    }

    /// Device types present in the map, sorted.
    pub fn device_types(&self) -> impl Iterator<Item = &DeviceType> {
        self.0.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DeviceType, VersionEntry)> for VersionMap {
    fn from_iter<I: IntoIterator<Item = (DeviceType, VersionEntry)>>(iter: I) -> Self {
        let mut inner: BTreeMap<DeviceType, Vec<VersionEntry>> = BTreeMap::new();
        for (device_type, entry) in iter {
            inner.entry(device_type).or_default().push(entry);
        }
        Self(inner)
    }
}

impl From<BTreeMap<DeviceType, Vec<VersionEntry>>> for VersionMap {
    fn from(inner: BTreeMap<DeviceType, Vec<VersionEntry>>) -> Self {
        Self(inner)
    }
}
