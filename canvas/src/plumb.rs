//! The connection-drawing library seam.
//!
//! [`Plumb`] captures what the controller needs from a jsPlumb-style library:
//! a container, items draggable inside it, styled endpoints, and connections
//! between endpoints. Connection storage belongs to the library; the
//! controller only asks for connections to be created.
//!
//! [`MemoryPlumb`] keeps everything in memory and enforces the same rules a
//! real library does (source-to-target only, per-endpoint connection limits).

#[cfg(test)]
#[path = "plumb_test.rs"]
mod plumb_test;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use uuid::Uuid;

use crate::doc::ItemId;
use crate::endpoint::{Endpoint, EndpointId, EndpointRole};
use crate::error::CanvasError;
use crate::geometry::{Point, Size};
use crate::page::ElementInfo;

/// Unique identifier for a connection.
pub type ConnectionId = Uuid;

/// Capabilities of the connection-drawing library.
pub trait Plumb {
    /// Register the element all items, endpoints and connections live in.
    /// Everything registered against a previous container is forgotten.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Plumb`] if the library rejects the container.
    fn set_container(&mut self, container: &ElementInfo) -> Result<(), CanvasError>;

    /// Make an item draggable, contained in a box of `containment` size.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Plumb`] if the library rejects the request.
    fn make_draggable(&mut self, item: &ItemId, containment: Size) -> Result<(), CanvasError>;

    /// Position an item at canvas-local coordinates and repaint whatever is
    /// attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Plumb`] if the library cannot move the item.
    fn move_item(&mut self, item: &ItemId, pos: Point) -> Result<(), CanvasError>;

    /// Attach a styled endpoint to its item.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Plumb`] if the library rejects the endpoint.
    fn add_endpoint(&mut self, endpoint: &Endpoint) -> Result<(), CanvasError>;

    /// Draw a connection from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoints are unknown to the library, their
    /// roles do not allow the connection, or a connection limit is reached.
    fn connect(&mut self, from: &Endpoint, to: &Endpoint) -> Result<ConnectionId, CanvasError>;

    /// Detach everything the library holds for an item.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Plumb`] if the library fails to remove it.
    fn remove_element(&mut self, item: &ItemId) -> Result<(), CanvasError>;
}

/// A directed connection between two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: EndpointId,
    pub to: EndpointId,
}

/// In-memory connection library.
#[derive(Debug, Default)]
pub struct MemoryPlumb {
    container: Option<String>,
    draggables: BTreeMap<ItemId, Size>,
    positions: BTreeMap<ItemId, Point>,
    endpoints: HashMap<EndpointId, Endpoint>,
    connections: Vec<Connection>,
}

impl MemoryPlumb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the registered container element, if any.
    #[must_use]
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    #[must_use]
    pub fn is_draggable(&self, item: &ItemId) -> bool {
        self.draggables.contains_key(item)
    }

    /// Containment box registered for a draggable item.
    #[must_use]
    pub fn containment(&self, item: &ItemId) -> Option<Size> {
        self.draggables.get(item).copied()
    }

    /// Last position the controller moved an item to.
    #[must_use]
    pub fn position(&self, item: &ItemId) -> Option<Point> {
        self.positions.get(item).copied()
    }

    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of connections touching an endpoint.
    #[must_use]
    pub fn connection_count(&self, endpoint: &EndpointId) -> usize {
        self.connections.iter().filter(|c| &c.from == endpoint || &c.to == endpoint).count()
    }

    fn check_limit(&self, endpoint: &Endpoint) -> Result<(), CanvasError> {
        match endpoint.style.max_connections {
            Some(max) if self.connection_count(&endpoint.id) >= max => Err(CanvasError::ConnectionLimit(endpoint.id)),
            _ => Ok(()),
        }
    }
}

impl Plumb for MemoryPlumb {
    fn set_container(&mut self, container: &ElementInfo) -> Result<(), CanvasError> {
        self.container = Some(container.id.clone().unwrap_or_else(|| container.tag.clone()));
        self.draggables.clear();
        self.positions.clear();
        self.endpoints.clear();
        self.connections.clear();
        Ok(())
    }

    fn make_draggable(&mut self, item: &ItemId, containment: Size) -> Result<(), CanvasError> {
        self.draggables.insert(item.clone(), containment);
        Ok(())
    }

    fn move_item(&mut self, item: &ItemId, pos: Point) -> Result<(), CanvasError> {
        self.positions.insert(item.clone(), pos);
        Ok(())
    }

    fn add_endpoint(&mut self, endpoint: &Endpoint) -> Result<(), CanvasError> {
        self.endpoints.insert(endpoint.id, endpoint.clone());
        Ok(())
    }

    fn connect(&mut self, from: &Endpoint, to: &Endpoint) -> Result<ConnectionId, CanvasError> {
        let from = self.endpoints.get(&from.id).ok_or(CanvasError::UnknownEndpoint(from.id))?;
        let to = self.endpoints.get(&to.id).ok_or(CanvasError::UnknownEndpoint(to.id))?;
        if from.role != EndpointRole::Source || to.role != EndpointRole::Target {
            return Err(CanvasError::RoleMismatch { from: from.role, to: to.role });
        }
        self.check_limit(from)?;
        self.check_limit(to)?;

        let connection = Connection { id: Uuid::new_v4(), from: from.id, to: to.id };
        let id = connection.id;
        self.connections.push(connection);
        Ok(id)
    }

    fn remove_element(&mut self, item: &ItemId) -> Result<(), CanvasError> {
        self.draggables.remove(item);
        self.positions.remove(item);
        let removed: Vec<EndpointId> =
            self.endpoints.values().filter(|e| &e.item == item).map(|e| e.id).collect();
        for id in &removed {
            self.endpoints.remove(id);
        }
        self.connections
            .retain(|c| !removed.contains(&c.from) && !removed.contains(&c.to));
        Ok(())
    }
}
