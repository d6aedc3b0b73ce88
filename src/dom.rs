//! `Page` over the live browser DOM.

use canvas::CanvasError;
use canvas::geometry::Rect;
use canvas::page::{ElementInfo, Page};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::error::BridgeError;

/// Reads element snapshots from the current document.
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    /// Bind to the global window and its document.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NoBrowser`] outside a browser page.
    pub fn from_window() -> Result<Self, BridgeError> {
        let window = web_sys::window().ok_or(BridgeError::NoBrowser("window"))?;
        let document = window.document().ok_or(BridgeError::NoBrowser("document"))?;
        Ok(Self { window, document })
    }

    /// Snapshot of one element. Rects are converted from viewport to page
    /// coordinates using the current scroll offset.
    fn snapshot(&self, el: &Element) -> ElementInfo {
        let mut info = ElementInfo::new(&el.tag_name());

        let id = el.id();
        if !id.is_empty() {
            info.id = Some(id);
        }

        let classes = el.class_list();
        info.classes = (0..classes.length()).filter_map(|i| classes.item(i)).collect();

        for name in el.get_attribute_names().iter().filter_map(|n| n.as_string()) {
            if let Some(value) = el.get_attribute(&name) {
                info.attrs.insert(name, value);
            }
        }

        info.text = el.text_content().unwrap_or_default().trim().to_string();

        let r = el.get_bounding_client_rect();
        let scroll_x = self.window.scroll_x().unwrap_or(0.0);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        info.rect = Rect::new(r.left() + scroll_x, r.top() + scroll_y, r.width(), r.height());
        info
    }
}

impl Page for DomPage {
    fn select(&self, selector: &str) -> Result<Vec<ElementInfo>, CanvasError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|_| CanvasError::InvalidSelector(selector.to_string()))?;

        let mut out = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            out.push(self.snapshot(&el));
        }
        Ok(out)
    }
}
