//! Pieces shared by the dashboard templates.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use dosehub_domain::device_type::DeviceType;
use dosehub_domain::version_map::VersionMap;

/// One entry of a device type `<select>`.
pub struct TypeOption {
    pub value: String,
    pub selected: bool,
}

/// Options for a device type `<select>`, with `selected` pre-chosen.
///
/// Returns the options and whether the `device` placeholder stays selected.
#[must_use]
pub fn type_options(types: &[DeviceType], selected: Option<&str>) -> (Vec<TypeOption>, bool) {
    let selected = selected.map(str::trim).filter(|s| !s.is_empty());
    let options: Vec<TypeOption> = types
        .iter()
        .map(|kind| TypeOption {
            value: kind.to_string(),
            selected: selected == Some(kind.as_str()),
        })
        .collect();
    let placeholder_selected = !options.iter().any(|option| option.selected);
    (options, placeholder_selected)
}

/// Device types offered by forms: the configured catalog, or the types that
/// already have versions when no catalog is configured.
#[must_use]
pub fn offered_types(catalog: &[DeviceType], map: &VersionMap) -> Vec<DeviceType> {
    if catalog.is_empty() {
        map.device_types().cloned().collect()
    } else {
        catalog.to_vec()
    }
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ErrorTemplate {
    fn into_response(self) -> Response {
        (self.status, Html(self.to_string())).into_response()
    }
}
