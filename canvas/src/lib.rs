//! Palette-to-canvas interaction engine for the flowboard workbench page.
//!
//! This crate holds everything about the canvas that can be expressed without
//! a browser: the palette of item templates, the canvas items placed from it,
//! the drag gesture state machine, connection endpoints, and the typed events
//! the integrating application subscribes to. The page DOM and the
//! connection-drawing library are reached through the [`page::Page`] and
//! [`plumb::Plumb`] traits so the whole controller runs in native tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::CanvasController`] and the [`engine::Action`]s it returns |
//! | [`doc`] | Canvas items and the document-ordered item store |
//! | [`palette`] | Palette templates and drag hooks |
//! | [`endpoint`] | Endpoint roles, styles and anchors |
//! | [`plumb`] | Connection-library trait and the in-memory implementation |
//! | [`page`] | Page/DOM trait, element snapshots and selectors |
//! | [`input`] | Drag sources and the gesture state machine |
//! | [`events`] | Typed event payloads and the subscription bus |
//! | [`geometry`] | Points, sizes, rectangles and canvas-local conversion |
//! | [`config`] | Controller configuration |
//! | [`error`] | [`error::CanvasError`] |
//! | [`consts`] | Shared defaults |

pub mod config;
pub mod consts;
pub mod doc;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod page;
pub mod palette;
pub mod plumb;

pub use config::ControllerConfig;
pub use engine::{Action, CanvasController};
pub use error::CanvasError;
