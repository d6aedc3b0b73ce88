//! Document model: canvas items and the document-ordered store that owns them.
//!
//! Items live in a `Vec` whose order is the document order of the rendered
//! canvas. The integrating application decides where a new item goes; drag
//! stop events report an item's position in this order, so the store keeps it
//! exact across insertions and removals.
//!
//! Ids are minted from a per-store creation counter and are never reused,
//! which keeps them unique even after removals.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, EndpointId, EndpointRole};
use crate::error::CanvasError;
use crate::geometry::{Point, Size};

/// Identifier of a canvas item, e.g. `canvasItem3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle stage of a canvas item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Inserted into the document, not yet draggable.
    Placed,
    /// Registered as draggable within the canvas.
    Draggable,
    /// Carries at least one endpoint.
    Endpointed,
}

/// A template instance placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    pub id: ItemId,
    /// Kind of the palette template this item was created from.
    pub kind: String,
    /// Left edge in canvas-local pixels.
    pub x: f64,
    /// Top edge in canvas-local pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// CSS classes the rendered element carries.
    pub classes: Vec<String>,
    pub draggable: bool,
    pub endpoints: Vec<Endpoint>,
}

impl CanvasItem {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether any attached endpoint can originate a connection.
    #[must_use]
    pub fn has_source_endpoint(&self) -> bool {
        self.endpoints.iter().any(|e| e.role == EndpointRole::Source)
    }

    /// Whether any attached endpoint can terminate a connection.
    #[must_use]
    pub fn has_target_endpoint(&self) -> bool {
        self.endpoints.iter().any(|e| e.role == EndpointRole::Target)
    }

    #[must_use]
    pub fn state(&self) -> ItemState {
        if !self.endpoints.is_empty() {
            ItemState::Endpointed
        } else if self.draggable {
            ItemState::Draggable
        } else {
            ItemState::Placed
        }
    }
}

/// Document-ordered store of canvas items.
pub struct ItemStore {
    items: Vec<CanvasItem>,
    id_prefix: String,
    created: usize,
}

impl ItemStore {
    /// Create an empty store minting ids with `id_prefix`.
    #[must_use]
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self { items: Vec::new(), id_prefix: id_prefix.into(), created: 0 }
    }

    /// Mint the id for the next item. Each call consumes one ordinal.
    pub fn next_id(&mut self) -> ItemId {
        let id = ItemId(format!("{}{}", self.id_prefix, self.created));
        self.created += 1;
        id
    }

    /// Insert an item at document position `index` (`index == len` appends).
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IndexOutOfRange`] when `index > len`.
    pub fn insert(&mut self, index: usize, item: CanvasItem) -> Result<(), CanvasError> {
        if index > self.items.len() {
            return Err(CanvasError::IndexOutOfRange { index, len: self.items.len() });
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Append an item at the end of the document.
    pub fn push(&mut self, item: CanvasItem) {
        self.items.push(item);
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<CanvasItem> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Current document index of an item.
    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Move an item. Returns false if the item doesn't exist.
    pub fn set_position(&mut self, id: &ItemId, pos: Point) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        item.x = pos.x;
        item.y = pos.y;
        true
    }

    /// Find an endpoint attached to any item.
    #[must_use]
    pub fn endpoint(&self, id: &EndpointId) -> Option<&Endpoint> {
        self.items.iter().flat_map(|i| i.endpoints.iter()).find(|e| &e.id == id)
    }

    /// Mutable items in document order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CanvasItem> {
        self.items.iter_mut()
    }

    /// Items in document order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasItem> {
        self.items.iter()
    }

    /// Items in document order as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CanvasItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
