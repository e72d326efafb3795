//! # dosehub-adapter-dom-web-sys
//!
//! Browser adapter compiled to WebAssembly.
//!
//! ## Responsibilities
//! - Implement the [`Document`] port over the live DOM via `web-sys`
//! - Expose the version selector to JavaScript: build it from the version
//!   map JSON, call it on demand, or attach it to the `change` event of a
//!   row's device dropdown
//!
//! ## Dependency rule
//! Depends on `dosehub-app` (for the selector and the port) and
//! `dosehub-domain`. Built separately from the server workspace.
//!
//! ## Building
//! `wasm-pack build --target web --out-dir <assets_dir>` writes the
//! package that `dosehubd` serves under `/pkg`; the add-device page imports
//! `/pkg/dosehub_adapter_dom_web_sys.js` and calls
//! `VersionSelectorHandle.fromForm("device-form").watch("0")`.

use dosehub_app::ports::Document;
use dosehub_app::selector::VersionSelector;
use dosehub_domain::error::{DoseHubError, MissingElementError};
use dosehub_domain::field::FieldIndex;
use dosehub_domain::markup::Element;
use dosehub_domain::version_map::VersionMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};

/// Attribute of the add-device form carrying the version map.
const VERSION_MAP_ATTRIBUTE: &str = "data-version-map";

/// [`Document`] over a browser page.
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }
}

impl Document for BrowserDocument {
    fn control_value(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        Some(element.get_attribute("value").unwrap_or_default())
    }

    fn replace_content(&mut self, id: &str, content: Option<Element>) -> Result<(), DoseHubError> {
        let container = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| MissingElementError { id: id.to_string() })?;
        // One assignment swaps every child, so the old options never linger.
        container.set_inner_html(&content.map(|c| c.render()).unwrap_or_default());
        Ok(())
    }
}

/// JavaScript handle on a [`VersionSelector`].
#[wasm_bindgen]
pub struct VersionSelectorHandle {
    selector: VersionSelector,
}

#[wasm_bindgen]
impl VersionSelectorHandle {
    /// Build a selector from `{ "<type>": [[id, "label"], ...] }`.
    ///
    /// # Errors
    ///
    /// Fails when the JSON is malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> Result<VersionSelectorHandle, JsError> {
        let versions = VersionMap::from_json(json)?;
        Ok(Self {
            selector: VersionSelector::new(versions),
        })
    }

    /// Build a selector from the version map embedded in the form `form_id`.
    ///
    /// # Errors
    ///
    /// Fails when there is no such form, it carries no map, or the map is
    /// malformed.
    #[wasm_bindgen(js_name = fromForm)]
    pub fn from_form(form_id: &str) -> Result<VersionSelectorHandle, JsError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("no document"))?;
        let form = document
            .get_element_by_id(form_id)
            .ok_or(MissingElementError {
                id: form_id.to_string(),
            })?;
        let json = form
            .get_attribute(VERSION_MAP_ATTRIBUTE)
            .ok_or_else(|| JsError::new("form has no version map"))?;
        Self::new(&json)
    }

    /// Re-render the versions of row `idx` from its current device.
    ///
    /// # Errors
    ///
    /// Fails when the row's device dropdown or versions container is
    /// missing.
    #[wasm_bindgen(js_name = selectVersion)]
    pub fn select_version(&self, idx: &str) -> Result<(), JsError> {
        let mut document =
            BrowserDocument::current().ok_or_else(|| JsError::new("no document"))?;
        self.selector
            .select_version(&mut document, &FieldIndex::from(idx))?;
        Ok(())
    }

    /// Call [`Self::select_version`] whenever row `idx`'s device changes.
    ///
    /// The listener stays attached while the returned guard is alive.
    ///
    /// # Errors
    ///
    /// Fails when the row's device dropdown is missing.
    pub fn watch(&self, idx: &str) -> Result<RowWatch, JsError> {
        let idx = FieldIndex::from(idx);
        let document = BrowserDocument::current().ok_or_else(|| JsError::new("no document"))?;
        let device_field = idx.device_field();
        let target = document
            .document
            .get_element_by_id(&device_field)
            .ok_or(MissingElementError { id: device_field })?;

        let selector = self.selector.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let Some(mut document) = BrowserDocument::current() else {
                return;
            };
            if let Err(err) = selector.select_version(&mut document, &idx) {
                web_sys::console::warn_1(&err.to_string().into());
            }
        });
        target
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            .map_err(|_| JsError::new("failed to add change listener"))?;

        Ok(RowWatch {
            target,
            on_change,
        })
    }
}

/// Guard that detaches the `change` listener on drop.
#[wasm_bindgen]
pub struct RowWatch {
    target: web_sys::Element,
    on_change: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for RowWatch {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("change", self.on_change.as_ref().unchecked_ref());
    }
}
