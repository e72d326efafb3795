//! Version selector — fills the version dropdown of a form row from the
//! device type chosen in the same row.

use dosehub_domain::error::{DoseHubError, MissingElementError};
use dosehub_domain::field::FieldIndex;
use dosehub_domain::selector::versions_for;
use dosehub_domain::version_map::VersionMap;

use crate::ports::Document;

/// Handler for device-selection changes.
///
/// Holds the version map it was built with; the map is never modified, so
/// one selector serves every row of a page.
#[derive(Debug, Clone)]
pub struct VersionSelector {
    versions: VersionMap,
}

impl VersionSelector {
    #[must_use]
    pub fn new(versions: VersionMap) -> Self {
        Self { versions }
    }

    /// Re-render the versions container of row `idx`.
    ///
    /// Reads the device type from `device{idx}`. When it has versions the
    /// container `versions{idx}` receives a required `version{idx}` select;
    /// otherwise the container is emptied.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::MissingElement`] when either element is
    /// absent from `document`.
    pub fn select_version<D>(&self, document: &mut D, idx: &FieldIndex) -> Result<(), DoseHubError>
    where
        D: Document + ?Sized,
    {
        let device_field = idx.device_field();
        let device = document
            .control_value(&device_field)
            .ok_or(MissingElementError { id: device_field })?;

        let content = versions_for(&self.versions, idx, &device);
        tracing::debug!(
            idx = %idx,
            device = %device,
            filled = content.is_some(),
            "version selector updated"
        );
        document.replace_content(&idx.versions_container(), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosehub_domain::markup::Element;
    use std::collections::HashMap;

    #[derive(Default)]
    struct InMemoryDocument {
        values: HashMap<String, String>,
        containers: HashMap<String, Option<Element>>,
        writes: usize,
    }

    impl InMemoryDocument {
        fn with_row(idx: &FieldIndex, device: &str) -> Self {
            let mut doc = Self::default();
            doc.values.insert(idx.device_field(), device.to_string());
            doc.containers.insert(idx.versions_container(), None);
            doc
        }

        fn choose(&mut self, idx: &FieldIndex, device: &str) {
            self.values.insert(idx.device_field(), device.to_string());
        }

        fn content(&self, idx: &FieldIndex) -> Option<&Element> {
            self.containers
                .get(&idx.versions_container())
                .and_then(Option::as_ref)
        }
    }

    impl Document for InMemoryDocument {
        fn control_value(&self, id: &str) -> Option<String> {
            self.values.get(id).cloned()
        }

        fn replace_content(
            &mut self,
            id: &str,
            content: Option<Element>,
        ) -> Result<(), DoseHubError> {
            let slot = self
                .containers
                .get_mut(id)
                .ok_or_else(|| MissingElementError { id: id.to_string() })?;
            *slot = content;
            self.writes += 1;
            Ok(())
        }
    }

    fn selector() -> VersionSelector {
        VersionSelector::new(
            VersionMap::from_json(
                r#"{ "router-A": [[1, "1.0.2"], [2, "1.1.0"]], "router-B": [], "router-C": [[9, "9.9"]] }"#,
            )
            .unwrap(),
        )
    }

    fn option_pairs(select: &Element) -> Vec<(Option<String>, String)> {
        select
            .find_all("option")
            .into_iter()
            .map(|o| (o.attribute("value").map(str::to_string), o.text_content()))
            .collect()
    }

    #[test]
    fn should_fill_container_for_device_with_versions() {
        let idx = FieldIndex::from(0);
        let mut doc = InMemoryDocument::with_row(&idx, "router-A");

        selector().select_version(&mut doc, &idx).unwrap();

        let select = doc.content(&idx).unwrap();
        assert_eq!(select.attribute("name"), Some("version0"));
        assert!(select.has_attribute("required"));
        assert_eq!(
            option_pairs(select),
            vec![
                (None, "version".to_string()),
                (Some("1".to_string()), "1.0.2".to_string()),
                (Some("2".to_string()), "1.1.0".to_string()),
            ]
        );
    }

    #[test]
    fn should_clear_container_for_device_without_versions() {
        let idx = FieldIndex::from(0);
        let mut doc = InMemoryDocument::with_row(&idx, "router-A");
        let selector = selector();
        selector.select_version(&mut doc, &idx).unwrap();

        doc.choose(&idx, "router-B");
        selector.select_version(&mut doc, &idx).unwrap();

        assert!(doc.content(&idx).is_none());
    }

    #[test]
    fn should_clear_container_for_unknown_device() {
        let idx = FieldIndex::from(2);
        let mut doc = InMemoryDocument::with_row(&idx, "toaster");

        selector().select_version(&mut doc, &idx).unwrap();

        assert!(doc.content(&idx).is_none());
        assert_eq!(doc.writes, 1);
    }

    #[test]
    fn should_render_identically_when_invoked_twice() {
        let idx = FieldIndex::from(1);
        let mut doc = InMemoryDocument::with_row(&idx, "router-A");
        let selector = selector();

        selector.select_version(&mut doc, &idx).unwrap();
        let first = doc.content(&idx).cloned();
        selector.select_version(&mut doc, &idx).unwrap();

        assert_eq!(doc.content(&idx).cloned(), first);
    }

    #[test]
    fn should_replace_previous_options_when_device_changes() {
        let idx = FieldIndex::from(0);
        let mut doc = InMemoryDocument::with_row(&idx, "router-A");
        let selector = selector();
        selector.select_version(&mut doc, &idx).unwrap();

        doc.choose(&idx, "router-C");
        selector.select_version(&mut doc, &idx).unwrap();

        let select = doc.content(&idx).unwrap();
        assert_eq!(
            option_pairs(select),
            vec![
                (None, "version".to_string()),
                (Some("9".to_string()), "9.9".to_string()),
            ]
        );
    }

    #[test]
    fn should_only_touch_its_own_row() {
        let first = FieldIndex::from(0);
        let second = FieldIndex::from(1);
        let mut doc = InMemoryDocument::with_row(&first, "router-A");
        doc.choose(&second, "router-C");
        doc.containers.insert(second.versions_container(), None);

        selector().select_version(&mut doc, &second).unwrap();

        assert!(doc.content(&first).is_none());
        assert!(doc.content(&second).is_some());
    }

    #[test]
    fn should_report_missing_device_control() {
        let idx = FieldIndex::from(0);
        let mut doc = InMemoryDocument::default();
        doc.containers.insert(idx.versions_container(), None);

        let result = selector().select_version(&mut doc, &idx);

        assert!(matches!(
            result,
            Err(DoseHubError::MissingElement(MissingElementError { ref id })) if id == "device0"
        ));
        assert_eq!(doc.writes, 0);
    }

    #[test]
    fn should_report_missing_container() {
        let idx = FieldIndex::from(5);
        let mut doc = InMemoryDocument::default();
        doc.choose(&idx, "router-A");

        let result = selector().select_version(&mut doc, &idx);

        assert!(matches!(
            result,
            Err(DoseHubError::MissingElement(MissingElementError { ref id })) if id == "versions5"
        ));
    }
}
