//! Connection endpoints: roles, visual styles and anchors.
//!
//! An endpoint is attached to one canvas item and is either a `Source` (can
//! originate a connection) or a `Target` (can terminate one). The style is
//! handed to the connection library verbatim; the controller only reads the
//! role and the connection limit.

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod endpoint_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{ENDPOINT_DOT_RADIUS, ENDPOINT_RECT_SIZE, SOURCE_ENDPOINT_COLOR, TARGET_ENDPOINT_COLOR};
use crate::doc::ItemId;

/// Unique identifier for an endpoint.
pub type EndpointId = Uuid;

/// Whether an endpoint originates or terminates connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointRole {
    Source,
    Target,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Visual shape of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EndpointShape {
    /// Filled circle.
    Dot { radius: f64 },
    /// Filled axis-aligned rectangle.
    Rectangle { width: f64, height: f64 },
}

/// Where on the item's bounding box the endpoint sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Center,
}

impl Anchor {
    /// Relative position of the anchor within a unit box, `(0,0)` top-left.
    #[must_use]
    pub fn relative(self) -> (f64, f64) {
        match self {
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Right => (1.0, 0.5),
            Self::BottomRight => (1.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomLeft => (0.0, 1.0),
            Self::Left => (0.0, 0.5),
            Self::TopLeft => (0.0, 0.0),
            Self::Center => (0.5, 0.5),
        }
    }
}

/// Visual style and limits of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointStyle {
    /// Fill color as a CSS color string.
    pub color: String,
    pub shape: EndpointShape,
    pub anchor: Anchor,
    /// Maximum simultaneous connections; `None` means unlimited.
    #[serde(default)]
    pub max_connections: Option<usize>,
}

impl EndpointStyle {
    /// Default style for source endpoints: a green dot on the right edge.
    #[must_use]
    pub fn default_source() -> Self {
        Self {
            color: SOURCE_ENDPOINT_COLOR.to_string(),
            shape: EndpointShape::Dot { radius: ENDPOINT_DOT_RADIUS },
            anchor: Anchor::Right,
            max_connections: None,
        }
    }

    /// Default style for target endpoints: a dark square on the left edge.
    #[must_use]
    pub fn default_target() -> Self {
        Self {
            color: TARGET_ENDPOINT_COLOR.to_string(),
            shape: EndpointShape::Rectangle { width: ENDPOINT_RECT_SIZE, height: ENDPOINT_RECT_SIZE },
            anchor: Anchor::Left,
            max_connections: None,
        }
    }
}

/// An endpoint attached to a canvas item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: EndpointId,
    /// The item this endpoint is attached to.
    pub item: ItemId,
    pub role: EndpointRole,
    pub style: EndpointStyle,
}

impl Endpoint {
    /// Create an endpoint with a fresh id.
    #[must_use]
    pub fn new(item: ItemId, role: EndpointRole, style: EndpointStyle) -> Self {
        Self { id: Uuid::new_v4(), item, role, style }
    }
}
