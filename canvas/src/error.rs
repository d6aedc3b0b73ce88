//! Error type shared by every fallible canvas operation.

use crate::doc::ItemId;
use crate::endpoint::{EndpointId, EndpointRole};

/// Error returned by controller, page and connection-library operations.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A selector required at initialization matched no element.
    #[error("no element matches selector `{selector}`")]
    MissingElement { selector: String },
    /// The selector could not be parsed.
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
    /// An operation needs canvas bounds but `initialize_canvas` has not run.
    #[error("canvas has not been initialized")]
    CanvasNotInitialized,
    /// No canvas item has this id.
    #[error("unknown canvas item `{0}`")]
    UnknownItem(ItemId),
    /// No endpoint has this id.
    #[error("unknown endpoint {0}")]
    UnknownEndpoint(EndpointId),
    /// A connection must run from a source endpoint to a target endpoint.
    #[error("cannot connect a {from} endpoint to a {to} endpoint")]
    RoleMismatch { from: EndpointRole, to: EndpointRole },
    /// The endpoint already carries as many connections as its style allows.
    #[error("endpoint {0} has reached its connection limit")]
    ConnectionLimit(EndpointId),
    /// Document insertion index past the end of the item list.
    #[error("document index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The connection-drawing library rejected a request.
    #[error("connection library error: {0}")]
    Plumb(String),
}
