//! Controller configuration, parsed from the JSON options object the page
//! passes at construction.
//!
//! Every field has a default, so `{}` is a valid configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ITEM_CLASS, DEFAULT_ITEM_HEIGHT, DEFAULT_ITEM_ID_PREFIX, DEFAULT_ITEM_WIDTH, DEFAULT_LOG_LEVEL,
    DEFAULT_PALETTE_KIND_ATTR,
};
use crate::endpoint::{EndpointShape, EndpointStyle};
use crate::error::CanvasError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// CSS class given to every canvas item.
    pub item_class: String,
    /// Prefix of generated item ids.
    pub item_id_prefix: String,
    /// Item width used for containment.
    pub item_width: f64,
    /// Item height used for containment.
    pub item_height: f64,
    /// Palette element attribute holding the template kind.
    pub palette_kind_attr: String,
    pub source_endpoint: EndpointStyle,
    pub target_endpoint: EndpointStyle,
    /// Maximum log level for the host subscriber.
    pub log_level: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            item_class: DEFAULT_ITEM_CLASS.to_string(),
            item_id_prefix: DEFAULT_ITEM_ID_PREFIX.to_string(),
            item_width: DEFAULT_ITEM_WIDTH,
            item_height: DEFAULT_ITEM_HEIGHT,
            palette_kind_attr: DEFAULT_PALETTE_KIND_ATTR.to_string(),
            source_endpoint: EndpointStyle::default_source(),
            target_endpoint: EndpointStyle::default_target(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ConfigParse`] for malformed JSON and
    /// [`CanvasError::InvalidConfig`] for values that fail validation.
    pub fn from_json(raw: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and required strings.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.item_class.trim().is_empty() {
            return Err(CanvasError::InvalidConfig("item_class must not be empty".into()));
        }
        if self.item_id_prefix.trim().is_empty() {
            return Err(CanvasError::InvalidConfig("item_id_prefix must not be empty".into()));
        }
        if !is_positive(self.item_width) || !is_positive(self.item_height) {
            return Err(CanvasError::InvalidConfig(format!(
                "item size must be positive, got {}x{}",
                self.item_width, self.item_height
            )));
        }
        validate_style("source_endpoint", &self.source_endpoint)?;
        validate_style("target_endpoint", &self.target_endpoint)?;
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CanvasError::InvalidConfig(format!("unknown log_level: {}", self.log_level)));
        }
        Ok(())
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn validate_style(field: &str, style: &EndpointStyle) -> Result<(), CanvasError> {
    if style.color.trim().is_empty() {
        return Err(CanvasError::InvalidConfig(format!("{field}.color must not be empty")));
    }
    let ok = match style.shape {
        EndpointShape::Dot { radius } => is_positive(radius),
        EndpointShape::Rectangle { width, height } => is_positive(width) && is_positive(height),
    };
    if !ok {
        return Err(CanvasError::InvalidConfig(format!("{field}.shape dimensions must be positive")));
    }
    if style.max_connections == Some(0) {
        return Err(CanvasError::InvalidConfig(format!("{field}.max_connections must be at least 1")));
    }
    Ok(())
}
