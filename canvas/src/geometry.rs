#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either page space or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle. For element bounds `x`/`y` are page coordinates
/// of the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Convert a page-space point into this rectangle's local frame.
    #[must_use]
    pub fn to_local(&self, page: Point) -> Point {
        page.sub(self.origin())
    }

    /// Convert a local point back into page space.
    #[must_use]
    pub fn to_page(&self, local: Point) -> Point {
        Point::new(local.x + self.x, local.y + self.y)
    }
}

/// Clamp the top-left corner of a box of `item` size so the box stays inside
/// a container of `bounds` size anchored at the local origin.
///
/// A box larger than the container is pinned to the origin on that axis.
#[must_use]
pub fn contain(pos: Point, item: Size, bounds: Size) -> Point {
    let max_x = (bounds.width - item.width).max(0.0);
    let max_y = (bounds.height - item.height).max(0.0);
    Point::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}
