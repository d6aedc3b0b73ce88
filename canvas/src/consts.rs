//! Shared defaults for the canvas crate.

// ── Items ───────────────────────────────────────────────────────

/// CSS class carried by every canvas item.
pub const DEFAULT_ITEM_CLASS: &str = "canvas-item";

/// Prefix of generated canvas item ids (`canvasItem0`, `canvasItem1`, ...).
pub const DEFAULT_ITEM_ID_PREFIX: &str = "canvasItem";

/// Item width used for containment when the host does not measure items.
pub const DEFAULT_ITEM_WIDTH: f64 = 120.0;

/// Item height used for containment when the host does not measure items.
pub const DEFAULT_ITEM_HEIGHT: f64 = 50.0;

// ── Palette ─────────────────────────────────────────────────────

/// Attribute naming a palette template's kind.
pub const DEFAULT_PALETTE_KIND_ATTR: &str = "data-type";

// ── Endpoints ───────────────────────────────────────────────────

/// Fill color of source endpoints.
pub const SOURCE_ENDPOINT_COLOR: &str = "#7AB02C";

/// Fill color of target endpoints.
pub const TARGET_ENDPOINT_COLOR: &str = "#316B31";

/// Radius of dot-shaped endpoints in pixels.
pub const ENDPOINT_DOT_RADIUS: f64 = 7.0;

/// Edge length of rectangle-shaped endpoints in pixels.
pub const ENDPOINT_RECT_SIZE: f64 = 14.0;

// ── Logging ─────────────────────────────────────────────────────

/// Default maximum log level for the host subscriber.
pub const DEFAULT_LOG_LEVEL: &str = "info";
