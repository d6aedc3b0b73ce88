//! Shared ownership of a controller across calls that may re-enter.
//!
//! Host callbacks must be free to call back into the controller, for
//! example to insert the item a drop asked for. Events are therefore queued
//! while the controller is borrowed and handed out only after the borrow
//! ends.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use canvas::CanvasController;
use canvas::events::{ItemMoved, PlacementRequested};
use canvas::plumb::Plumb;
use serde::Serialize;

use crate::error::BridgeError;

/// An event waiting for delivery to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outgoing {
    Placement(PlacementRequested),
    ItemMoved(ItemMoved),
}

pub struct Session<P: Plumb> {
    controller: RefCell<CanvasController<P>>,
    outbox: Rc<RefCell<VecDeque<Outgoing>>>,
}

impl<P: Plumb> Session<P> {
    #[must_use]
    pub fn new(mut controller: CanvasController<P>) -> Self {
        let outbox = Rc::new(RefCell::new(VecDeque::new()));

        let queue = Rc::clone(&outbox);
        controller.on_placement_requested(move |ev| queue.borrow_mut().push_back(Outgoing::Placement(ev.clone())));
        let queue = Rc::clone(&outbox);
        controller.on_item_moved(move |ev| queue.borrow_mut().push_back(Outgoing::ItemMoved(ev.clone())));

        Self { controller: RefCell::new(controller), outbox }
    }

    /// Run `f` against the controller.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Reentrant`] when called from inside another `with`.
    pub fn with<R>(&self, f: impl FnOnce(&mut CanvasController<P>) -> R) -> Result<R, BridgeError> {
        let mut controller = self.controller.try_borrow_mut().map_err(|_| BridgeError::Reentrant)?;
        Ok(f(&mut controller))
    }

    /// Hand queued events to `handle` one at a time, with the controller
    /// free. Events queued by `handle` itself are delivered in the same call.
    pub fn dispatch(&self, mut handle: impl FnMut(&Self, Outgoing)) {
        loop {
            let Some(event) = self.outbox.borrow_mut().pop_front() else {
                break;
            };
            handle(self, event);
        }
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.outbox.borrow().len()
    }
}
