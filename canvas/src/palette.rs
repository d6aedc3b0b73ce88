//! Palette: the static item templates users drag onto the canvas.
//!
//! Templates are read once from page markup and never change afterwards.
//! Dragging a template produces a visual clone (the host's helper element);
//! the template itself is not moved or mutated.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::{Deserialize, Serialize};

use crate::page::ElementInfo;

/// A template descriptor defined in markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteItem {
    /// Type/category id handed to the placement callback.
    pub kind: String,
    /// Visual label.
    pub label: String,
}

impl PaletteItem {
    /// Build a template from a palette element.
    ///
    /// The kind comes from `kind_attr`, then the element id, then the label.
    /// Returns `None` when all three are empty.
    #[must_use]
    pub fn from_element(element: &ElementInfo, kind_attr: &str) -> Option<Self> {
        let label = element.text.clone();
        let kind = element
            .attr(kind_attr)
            .filter(|k| !k.is_empty())
            .or(element.id.as_deref().filter(|k| !k.is_empty()))
            .unwrap_or(label.as_str())
            .to_string();
        if kind.is_empty() {
            return None;
        }
        Some(Self { kind, label })
    }
}

/// The set of templates registered as drag sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    templates: Vec<PaletteItem>,
    /// Selector the templates were resolved from.
    pub selector: String,
    /// Selector of the canvas the templates drop onto.
    pub canvas_selector: String,
}

impl Palette {
    #[must_use]
    pub fn new(templates: Vec<PaletteItem>, selector: &str, canvas_selector: &str) -> Self {
        Self { templates, selector: selector.to_string(), canvas_selector: canvas_selector.to_string() }
    }

    /// Look up a template by kind.
    #[must_use]
    pub fn template(&self, kind: &str) -> Option<&PaletteItem> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    #[must_use]
    pub fn templates(&self) -> &[PaletteItem] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Extension hooks around template drags. Both default to no-ops.
pub trait DragHooks {
    /// A template drag started.
    fn on_start(&mut self, _template: &PaletteItem) {}

    /// A template drag ended; `dropped` is true when it landed on the canvas.
    fn on_stop(&mut self, _template: &PaletteItem, _dropped: bool) {}
}

/// The default hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl DragHooks for NoopHooks {}
