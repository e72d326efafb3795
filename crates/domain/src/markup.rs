//! Markup tree — UI output built as data and rendered to escaped HTML.
//!
//! Forms and fragments are assembled with the [`Element`] builder instead of
//! string concatenation, so tests can inspect structure and labels coming
//! from storage can never inject markup.

use std::fmt;

/// Elements rendered without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "input", "link", "meta"];

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    fn text_into(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.text_into(out);
                }
            }
            Self::Text(text) => out.push_str(text),
        }
    }
}

/// An attribute; `value` is `None` for boolean flags such as `required`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set a valued attribute, replacing any previous value.
    #[must_use]
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name.into(), Some(value.into()))
    }

    /// Set a boolean attribute.
    #[must_use]
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.set(name.into(), None)
    }

    /// Set a boolean attribute only when `enabled`.
    #[must_use]
    pub fn flag_if(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled { self.flag(name) } else { self }
    }

    fn set(mut self, name: String, value: Option<String>) -> Self {
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            self.attributes.push(Attribute { name, value });
        }
        self
    }

    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of a valued attribute; `None` when absent or a flag.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.text_into(&mut out);
        }
        out
    }

    /// This element and its descendants with the given tag, in document order.
    #[must_use]
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect(tag, found);
        }
    }

    /// Render to an HTML string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for attribute in &self.attributes {
            match &attribute.value {
                Some(value) => write!(
                    f,
                    " {}=\"{}\"",
                    attribute.name,
                    html_escape::encode_double_quoted_attribute(value)
                )?,
                None => write!(f, " {}", attribute.name)?,
            }
        }
        f.write_str(">")?;
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return Ok(());
        }
        for child in &self.children {
            match child {
                Node::Element(element) => write!(f, "{element}")?,
                Node::Text(text) => f.write_str(&html_escape::encode_text(text))?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}
