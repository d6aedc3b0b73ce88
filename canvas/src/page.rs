//! Page model: element snapshots, selectors, and the [`Page`] trait.
//!
//! The controller never touches the DOM directly. At initialization it asks a
//! [`Page`] for the elements matching a selector and keeps what it needs from
//! the returned [`ElementInfo`] snapshots (template kinds, canvas bounds).
//! The browser layer implements `Page` over `querySelectorAll`; [`StaticPage`]
//! is an in-memory page for tests and headless hosts.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::collections::BTreeMap;

use crate::error::CanvasError;
use crate::geometry::Rect;

/// Source of element snapshots for a selector.
pub trait Page {
    /// Elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidSelector`] when the selector is malformed.
    fn select(&self, selector: &str) -> Result<Vec<ElementInfo>, CanvasError>;
}

/// Snapshot of one page element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementInfo {
    /// Lowercase tag name.
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Trimmed text content.
    pub text: String,
    /// Bounding box in page coordinates.
    pub rect: Rect,
}

impl ElementInfo {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), ..Default::default() }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.trim().to_string();
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn matches(&self, selector: &Selector) -> bool {
        selector.matches(&self.tag, self.id.as_deref(), &self.classes)
    }
}

/// A comma-separated list of compound selectors (`tag#id.class`, `*`).
///
/// Combinators, attribute selectors and pseudo-classes are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse a selector.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidSelector`] for empty input or anything
    /// outside the supported grammar.
    pub fn parse(raw: &str) -> Result<Self, CanvasError> {
        let invalid = || CanvasError::InvalidSelector(raw.to_string());
        let mut alternatives = Vec::new();
        for part in raw.split(',') {
            let compound = parse_compound(part.trim()).ok_or_else(invalid)?;
            alternatives.push(compound);
        }
        Ok(Self { alternatives })
    }

    /// Whether an element with this tag, id and classes matches.
    #[must_use]
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        self.alternatives.iter().any(|c| {
            c.tag.as_ref().is_none_or(|t| t.eq_ignore_ascii_case(tag))
                && c.id.as_ref().is_none_or(|want| id == Some(want.as_str()))
                && c.classes.iter().all(|want| classes.iter().any(|have| have == want))
        })
    }
}

fn parse_compound(raw: &str) -> Option<Compound> {
    if raw.is_empty() {
        return None;
    }
    let mut compound = Compound::default();

    let tag_len = raw.find(['#', '.']).unwrap_or(raw.len());
    let tag = &raw[..tag_len];
    if !tag.is_empty() && tag != "*" {
        if !is_ident(tag) {
            return None;
        }
        compound.tag = Some(tag.to_ascii_lowercase());
    }

    let mut rest = &raw[tag_len..];
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let len = body.find(['#', '.']).unwrap_or(body.len());
        let name = &body[..len];
        if !is_ident(name) {
            return None;
        }
        if marker == '#' {
            if compound.id.is_some() {
                return None;
            }
            compound.id = Some(name.to_string());
        } else {
            compound.classes.push(name.to_string());
        }
        rest = &body[len..];
    }
    Some(compound)
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// In-memory page holding element snapshots in document order.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    elements: Vec<ElementInfo>,
}

impl StaticPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element at the end of the document.
    pub fn push(&mut self, element: ElementInfo) {
        self.elements.push(element);
    }

    #[must_use]
    pub fn with(mut self, element: ElementInfo) -> Self {
        self.push(element);
        self
    }
}

impl Page for StaticPage {
    fn select(&self, selector: &str) -> Result<Vec<ElementInfo>, CanvasError> {
        let selector = Selector::parse(selector)?;
        Ok(self.elements.iter().filter(|e| e.matches(&selector)).cloned().collect())
    }
}
