//! # flowboard
//!
//! Browser page layer for the flowboard workbench. Wraps the headless
//! [`canvas::CanvasController`] with a live-DOM [`canvas::page::Page`], a
//! jsPlumb-backed [`canvas::plumb::Plumb`], and console logging, and exports
//! the result to JavaScript as [`controller::PageController`].

pub mod controller;
pub mod dom;
pub mod error;
pub mod logging;
pub mod plumb;
pub mod session;

pub use controller::PageController;
pub use error::BridgeError;
