//! Input model: what is being dragged and the gesture state machine.
//!
//! The host gesture library reports drag start, move and stop with the
//! pointer's page position. `DragSource` names the element the gesture began
//! on. `InputState` is the gesture being tracked between start and stop,
//! carrying what the controller needs to emit the final event on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ItemId;
use crate::geometry::Point;

/// The element a drag gesture started on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragSource {
    /// A palette template, by kind.
    Template { kind: String },
    /// A canvas item, by id.
    Item { id: ItemId },
    /// Any other draggable on the page. Never accepted as a drop.
    Foreign,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A clone of a palette template follows the pointer.
    DraggingTemplate {
        /// Kind of the template being dragged.
        kind: String,
        /// Page-space pointer position at the previous event.
        last_page: Point,
    },
    /// A canvas item is being moved inside the canvas.
    DraggingItem {
        /// Id of the item being dragged.
        id: ItemId,
        /// Pointer offset from the item's top-left corner at drag start.
        grab: Point,
        /// Item x at the start of the drag.
        orig_x: f64,
        /// Item y at the start of the drag.
        orig_y: f64,
    },
    /// A drag the controller does not handle; its stop is swallowed.
    Ignored,
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
