//! Document port — the host page's element tree, as seen by form logic.

use dosehub_domain::error::DoseHubError;
use dosehub_domain::markup::Element;

/// Access to the elements of a rendered form.
///
/// Implemented over the browser DOM by the web-sys adapter and in memory for
/// tests.
pub trait Document {
    /// Current value of the value-bearing control with this id, or `None`
    /// when no such element exists.
    fn control_value(&self, id: &str) -> Option<String>;

    /// Replace every child of the element with this id by `content`, or
    /// clear it when `content` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::MissingElement`] when the element does not
    /// exist; nothing is written in that case.
    fn replace_content(&mut self, id: &str, content: Option<Element>) -> Result<(), DoseHubError>;
}
