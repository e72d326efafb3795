//! Dependent version dropdown rendering.

use crate::field::FieldIndex;
use crate::markup::Element;
use crate::version_map::{VersionEntry, VersionMap};

/// Text of the disabled first option.
pub const PLACEHOLDER: &str = "version";

/// Build the version `<select>` for row `idx`.
///
/// Returns `None` when `entries` is empty: the container must then be
/// cleared rather than given an empty control.
#[must_use]
pub fn render_version_select(idx: &FieldIndex, entries: &[VersionEntry]) -> Option<Element> {
    if entries.is_empty() {
        return None;
    }

    let placeholder = Element::new("option")
        .flag("disabled")
        .flag("selected")
        .text(PLACEHOLDER);
    let options = entries
        .iter()
        .map(|entry| Element::new("option").attr("value", &entry.value).text(&entry.label));

    Some(
        Element::new("select")
            .attr("name", idx.version_field())
            .flag("required")
            .child(placeholder)
            .children(options),
    )
}

/// Look `device` up in `map` and build the control for row `idx`.
///
/// Unknown device types and types without versions yield `None`.
#[must_use]
pub fn versions_for(map: &VersionMap, idx: &FieldIndex, device: &str) -> Option<Element> {
    map.get(device)
        .and_then(|entries| render_version_select(idx, entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> VersionMap {
        VersionMap::from_json(r#"{ "router-A": [[1, "1.0.2"], [2, "1.1.0"]], "router-B": [] }"#)
            .unwrap()
    }

    #[test]
    fn should_build_required_select_with_placeholder_first() {
        let select = versions_for(&sample_map(), &FieldIndex::from(0), "router-A").unwrap();

        assert_eq!(select.tag(), "select");
        assert_eq!(select.attribute("name"), Some("version0"));
        assert!(select.has_attribute("required"));

        let options: Vec<_> = select.child_elements().collect();
        assert_eq!(options.len(), 3);
        assert!(options[0].has_attribute("disabled"));
        assert!(options[0].has_attribute("selected"));
        assert_eq!(options[0].text_content(), "version");
        assert_eq!(options[1].attribute("value"), Some("1"));
        assert_eq!(options[1].text_content(), "1.0.2");
        assert_eq!(options[2].attribute("value"), Some("2"));
        assert_eq!(options[2].text_content(), "1.1.0");
    }

    #[test]
    fn should_render_expected_markup() {
        let select = versions_for(&sample_map(), &FieldIndex::from(0), "router-A").unwrap();
        assert_eq!(
            select.render(),
            "<select name=\"version0\" required>\
             <option disabled selected>version</option>\
             <option value=\"1\">1.0.2</option>\
             <option value=\"2\">1.1.0</option>\
             </select>"
        );
    }

    #[test]
    fn should_yield_nothing_for_empty_version_list() {
        assert!(versions_for(&sample_map(), &FieldIndex::from(0), "router-B").is_none());
    }

    #[test]
    fn should_yield_nothing_for_unknown_device() {
        assert!(versions_for(&sample_map(), &FieldIndex::from(0), "router-Z").is_none());
        assert!(versions_for(&sample_map(), &FieldIndex::from(0), "").is_none());
    }

    #[test]
    fn should_offer_one_option_per_entry_plus_placeholder() {
        let entries: Vec<VersionEntry> = (0..25)
            .map(|n| VersionEntry::new(n.to_string(), format!("v{n}")))
            .collect();
        let select = render_version_select(&FieldIndex::from(4), &entries).unwrap();

        let options = select.find_all("option");
        assert_eq!(options.len(), entries.len() + 1);
        for (option, entry) in options.iter().skip(1).zip(&entries) {
            assert_eq!(option.attribute("value"), Some(entry.value.as_str()));
            assert_eq!(option.text_content(), entry.label);
        }
    }
}
