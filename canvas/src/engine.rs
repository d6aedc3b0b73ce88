use serde::Serialize;

use crate::config::ControllerConfig;
use crate::doc::{CanvasItem, ItemId, ItemStore};
use crate::endpoint::{Endpoint, EndpointId, EndpointRole};
use crate::error::CanvasError;
use crate::events::{EventBus, ItemMoved, PlacementRequested, SubscriptionId};
use crate::geometry::{Point, Rect, contain};
use crate::input::{DragSource, InputState};
use crate::page::Page;
use crate::palette::{DragHooks, NoopHooks, Palette, PaletteItem};
use crate::plumb::{ConnectionId, Plumb};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// DOM effects returned from gesture handlers for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Show a clone of the template at a page position.
    ShowHelper { kind: String, x: f64, y: f64 },
    /// Move the template clone to a page position.
    MoveHelper { x: f64, y: f64 },
    /// Discard the template clone.
    RemoveHelper,
    /// Position an item at canvas-local coordinates.
    ItemPositioned { id: ItemId, x: f64, y: f64 },
}

/// The registered canvas surface.
#[derive(Debug, Clone, PartialEq)]
struct CanvasSurface {
    selector: String,
    bounds: Rect,
}

/// Mediates between the palette and the canvas: turns drag gestures into
/// placement requests, item moves and endpoint attachments.
///
/// One controller per canvas. Construct it at page-init time and hand it to
/// whatever code wires gesture events.
pub struct CanvasController<P: Plumb> {
    config: ControllerConfig,
    plumb: P,
    palette: Option<Palette>,
    canvas: Option<CanvasSurface>,
    items: ItemStore,
    input: InputState,
    hooks: Box<dyn DragHooks>,
    placements: EventBus<PlacementRequested>,
    moves: EventBus<ItemMoved>,
}

impl<P: Plumb> CanvasController<P> {
    /// Create a controller.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: ControllerConfig, plumb: P) -> Result<Self, CanvasError> {
        config.validate()?;
        let items = ItemStore::new(config.item_id_prefix.clone());
        Ok(Self {
            config,
            plumb,
            palette: None,
            canvas: None,
            items,
            input: InputState::Idle,
            hooks: Box::new(NoopHooks),
            placements: EventBus::new(),
            moves: EventBus::new(),
        })
    }

    // --- Initialization ---

    /// Register the palette templates matching `palette_selector` as drag
    /// sources for the canvas matching `canvas_selector`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::MissingElement`] when either selector matches
    /// nothing, or the page's selector error.
    pub fn initialize_palette(
        &mut self,
        page: &impl Page,
        palette_selector: &str,
        canvas_selector: &str,
    ) -> Result<&Palette, CanvasError> {
        let elements = page.select(palette_selector)?;
        if elements.is_empty() {
            return Err(CanvasError::MissingElement { selector: palette_selector.to_string() });
        }
        if page.select(canvas_selector)?.is_empty() {
            return Err(CanvasError::MissingElement { selector: canvas_selector.to_string() });
        }

        let kind_attr = &self.config.palette_kind_attr;
        let templates: Vec<PaletteItem> = elements
            .iter()
            .filter_map(|el| {
                let template = PaletteItem::from_element(el, kind_attr);
                if template.is_none() {
                    tracing::warn!(tag = %el.tag, "palette element has no kind; skipped");
                }
                template
            })
            .collect();

        tracing::info!(count = templates.len(), selector = palette_selector, "palette initialized");
        Ok(&*self.palette.insert(Palette::new(templates, palette_selector, canvas_selector)))
    }

    /// Register the canvas as the drop target and connection container.
    ///
    /// Safe to call again after the host replaces the canvas element. The
    /// connection library forgets everything on a new container, so items
    /// already draggable and their endpoints are registered again.
    /// Connections drawn against the old element are not restored.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::MissingElement`] when the selector matches
    /// nothing, or the connection library's error.
    pub fn initialize_canvas(&mut self, page: &impl Page, canvas_selector: &str) -> Result<Rect, CanvasError> {
        let element = page
            .select(canvas_selector)?
            .into_iter()
            .next()
            .ok_or_else(|| CanvasError::MissingElement { selector: canvas_selector.to_string() })?;

        self.plumb.set_container(&element)?;
        let bounds = element.rect;
        let mut endpoints = 0;
        for item in self.items.iter() {
            if item.draggable {
                self.plumb.make_draggable(&item.id, bounds.size())?;
                self.plumb.move_item(&item.id, item.position())?;
            }
            for endpoint in &item.endpoints {
                self.plumb.add_endpoint(endpoint)?;
                endpoints += 1;
            }
        }

        tracing::info!(
            selector = canvas_selector,
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            endpoints,
            "canvas initialized"
        );
        self.canvas = Some(CanvasSurface { selector: canvas_selector.to_string(), bounds });
        Ok(bounds)
    }

    /// Make every canvas item rendered at `item_selector` draggable inside the
    /// canvas. Returns the number of items registered.
    ///
    /// The rendered element's measured size replaces the configured item
    /// size, so containment matches what the user sees. Matches that are not
    /// canvas items are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CanvasNotInitialized`] before
    /// [`Self::initialize_canvas`], the page's selector error, or the
    /// connection library's error.
    pub fn enable_item_dragging(&mut self, page: &impl Page, item_selector: &str) -> Result<usize, CanvasError> {
        let containment = self.canvas.as_ref().ok_or(CanvasError::CanvasNotInitialized)?.bounds.size();
        let elements = page.select(item_selector)?;

        let mut count = 0;
        for el in &elements {
            let Some(item) = el.id.as_deref().and_then(|id| self.items.get_mut(&ItemId::from(id))) else {
                tracing::debug!(tag = %el.tag, id = ?el.id, "matched element is not a canvas item; skipped");
                continue;
            };
            if el.rect.width > 0.0 && el.rect.height > 0.0 {
                item.width = el.rect.width;
                item.height = el.rect.height;
            }
            self.plumb.make_draggable(&item.id, containment)?;
            item.draggable = true;
            count += 1;
        }

        tracing::debug!(count, selector = item_selector, "items made draggable");
        Ok(count)
    }

    /// Replace the palette drag hooks.
    pub fn set_drag_hooks(&mut self, hooks: impl DragHooks + 'static) {
        self.hooks = Box::new(hooks);
    }

    /// Update the canvas bounds after a layout change.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CanvasNotInitialized`] before
    /// [`Self::initialize_canvas`].
    pub fn set_canvas_bounds(&mut self, bounds: Rect) -> Result<(), CanvasError> {
        let canvas = self.canvas.as_mut().ok_or(CanvasError::CanvasNotInitialized)?;
        canvas.bounds = bounds;
        for item in self.items.iter().filter(|i| i.draggable) {
            self.plumb.make_draggable(&item.id, bounds.size())?;
        }
        tracing::debug!(width = bounds.width, height = bounds.height, "canvas bounds updated");
        Ok(())
    }

    // --- Items ---

    /// Insert a new item at document position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IndexOutOfRange`] when `index` is past the end.
    pub fn insert_item(&mut self, index: usize, kind: &str, at: Point) -> Result<ItemId, CanvasError> {
        if index > self.items.len() {
            return Err(CanvasError::IndexOutOfRange { index, len: self.items.len() });
        }
        let item = self.new_item(kind, at);
        let id = item.id.clone();
        self.items.insert(index, item)?;
        tracing::info!(%id, kind, index, x = at.x, y = at.y, "item placed");
        Ok(id)
    }

    /// Append a new item at the end of the document.
    pub fn append_item(&mut self, kind: &str, at: Point) -> ItemId {
        let item = self.new_item(kind, at);
        let id = item.id.clone();
        self.items.push(item);
        tracing::info!(%id, kind, x = at.x, y = at.y, "item placed");
        id
    }

    /// Remove an item and everything the connection library holds for it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownItem`] if no item has this id.
    pub fn remove_item(&mut self, id: &ItemId) -> Result<CanvasItem, CanvasError> {
        if self.items.get(id).is_none() {
            return Err(CanvasError::UnknownItem(id.clone()));
        }
        self.plumb.remove_element(id)?;
        let item = self.items.remove(id).ok_or_else(|| CanvasError::UnknownItem(id.clone()))?;
        tracing::info!(%id, "item removed");
        Ok(item)
    }

    fn new_item(&mut self, kind: &str, at: Point) -> CanvasItem {
        CanvasItem {
            id: self.items.next_id(),
            kind: kind.to_string(),
            x: at.x,
            y: at.y,
            width: self.config.item_width,
            height: self.config.item_height,
            classes: vec![self.config.item_class.clone()],
            draggable: false,
            endpoints: Vec::new(),
        }
    }

    // --- Endpoints ---

    /// Attach a source endpoint to an item.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownItem`] if the item does not exist, or the
    /// connection library's error.
    pub fn add_source_endpoint(&mut self, item: &ItemId) -> Result<EndpointId, CanvasError> {
        self.add_endpoint(item, EndpointRole::Source)
    }

    /// Attach a target endpoint to an item.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownItem`] if the item does not exist, or the
    /// connection library's error.
    pub fn add_target_endpoint(&mut self, item: &ItemId) -> Result<EndpointId, CanvasError> {
        self.add_endpoint(item, EndpointRole::Target)
    }

    fn add_endpoint(&mut self, item_id: &ItemId, role: EndpointRole) -> Result<EndpointId, CanvasError> {
        let style = match role {
            EndpointRole::Source => self.config.source_endpoint.clone(),
            EndpointRole::Target => self.config.target_endpoint.clone(),
        };
        let item = self.items.get_mut(item_id).ok_or_else(|| CanvasError::UnknownItem(item_id.clone()))?;
        let endpoint = Endpoint::new(item_id.clone(), role, style);
        self.plumb.add_endpoint(&endpoint)?;

        let id = endpoint.id;
        item.endpoints.push(endpoint);
        tracing::debug!(item = %item_id, endpoint = %id, %role, "endpoint attached");
        Ok(id)
    }

    /// Ask the connection library to connect a source endpoint to a target
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownEndpoint`], [`CanvasError::RoleMismatch`],
    /// or the connection library's error.
    pub fn connect(&mut self, from: EndpointId, to: EndpointId) -> Result<ConnectionId, CanvasError> {
        let source = self.items.endpoint(&from).ok_or(CanvasError::UnknownEndpoint(from))?;
        let target = self.items.endpoint(&to).ok_or(CanvasError::UnknownEndpoint(to))?;
        if source.role != EndpointRole::Source || target.role != EndpointRole::Target {
            return Err(CanvasError::RoleMismatch { from: source.role, to: target.role });
        }
        let id = self.plumb.connect(source, target)?;
        tracing::debug!(connection = %id, from = %source.item, to = %target.item, "connection requested");
        Ok(id)
    }

    // --- Subscriptions ---

    /// Subscribe to drops of palette templates onto the canvas.
    pub fn on_placement_requested<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&PlacementRequested) + 'static,
    {
        self.placements.subscribe(handler)
    }

    /// Subscribe to completed item drags.
    pub fn on_item_moved<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ItemMoved) + 'static,
    {
        self.moves.subscribe(handler)
    }

    /// Remove a placement handler. Returns false if it was not registered.
    pub fn unsubscribe_placement(&mut self, id: SubscriptionId) -> bool {
        self.placements.unsubscribe(id)
    }

    /// Remove an item-moved handler. Returns false if it was not registered.
    pub fn unsubscribe_item_moved(&mut self, id: SubscriptionId) -> bool {
        self.moves.unsubscribe(id)
    }

    // --- Gestures ---

    /// A drag started on `source` with the pointer at `page`.
    pub fn on_drag_start(&mut self, source: DragSource, page: Point) -> Vec<Action> {
        let mut actions = self.abandon_gesture();

        match source {
            DragSource::Template { kind } => {
                let Some(template) = self.palette.as_ref().and_then(|p| p.template(&kind)) else {
                    tracing::warn!(kind = %kind, "drag started on unknown palette template; ignored");
                    self.input = InputState::Ignored;
                    return actions;
                };
                self.hooks.on_start(template);
                tracing::debug!(kind = %kind, "template drag started");
                actions.push(Action::ShowHelper { kind: kind.clone(), x: page.x, y: page.y });
                self.input = InputState::DraggingTemplate { kind, last_page: page };
            }
            DragSource::Item { id } => {
                let Some(canvas) = &self.canvas else {
                    tracing::warn!(%id, "item drag before canvas initialization; ignored");
                    self.input = InputState::Ignored;
                    return actions;
                };
                let Some(item) = self.items.get(&id) else {
                    tracing::warn!(%id, "drag started on unknown item; ignored");
                    self.input = InputState::Ignored;
                    return actions;
                };
                if !item.draggable {
                    tracing::debug!(%id, "item is not draggable; ignored");
                    self.input = InputState::Ignored;
                    return actions;
                }
                let grab = canvas.bounds.to_local(page).sub(item.position());
                tracing::debug!(%id, "item drag started");
                self.input = InputState::DraggingItem { orig_x: item.x, orig_y: item.y, id, grab };
            }
            DragSource::Foreign => {
                self.input = InputState::Ignored;
            }
        }
        actions
    }

    /// The pointer moved during a drag.
    pub fn on_drag_move(&mut self, page: Point) -> Vec<Action> {
        let (id, grab) = match &mut self.input {
            InputState::DraggingTemplate { last_page, .. } => {
                *last_page = page;
                return vec![Action::MoveHelper { x: page.x, y: page.y }];
            }
            InputState::DraggingItem { id, grab, .. } => (id.clone(), *grab),
            InputState::Idle | InputState::Ignored => return Vec::new(),
        };

        let Some(pos) = self.contained_position(&id, page, grab) else {
            tracing::warn!(%id, "dragged item no longer exists; gesture ignored");
            self.input = InputState::Ignored;
            return Vec::new();
        };
        self.place(&id, pos);
        vec![Action::ItemPositioned { id, x: pos.x, y: pos.y }]
    }

    /// The pointer was released.
    pub fn on_drag_stop(&mut self, page: Point) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => {
                tracing::debug!("drag stop without a gesture; ignored");
                Vec::new()
            }
            InputState::Ignored => Vec::new(),
            InputState::DraggingTemplate { kind, .. } => {
                let dropped = self.drop_template(&kind, page);
                if let Some(template) = self.palette.as_ref().and_then(|p| p.template(&kind)) {
                    self.hooks.on_stop(template, dropped);
                }
                vec![Action::RemoveHelper]
            }
            InputState::DraggingItem { id, grab, orig_x, orig_y } => {
                let (Some(pos), Some(index)) = (self.contained_position(&id, page, grab), self.items.index_of(&id))
                else {
                    tracing::warn!(%id, "drag stopped on an item that no longer exists; ignored");
                    return Vec::new();
                };
                self.place(&id, pos);
                tracing::debug!(%id, index, orig_x, orig_y, x = pos.x, y = pos.y, "item drag finished");
                self.moves.publish(&ItemMoved { index, id: id.clone(), x: pos.x, y: pos.y });
                vec![Action::ItemPositioned { id, x: pos.x, y: pos.y }]
            }
        }
    }

    /// Publish a placement if `page` is on the canvas. Returns whether a drop
    /// occurred.
    fn drop_template(&mut self, kind: &str, page: Point) -> bool {
        let Some(canvas) = &self.canvas else {
            tracing::warn!(kind, "template released before canvas initialization; no drop");
            return false;
        };
        if self.palette.as_ref().is_some_and(|p| p.canvas_selector != canvas.selector) {
            tracing::warn!(kind, canvas = %canvas.selector, "template released over a canvas it was not registered for; no drop");
            return false;
        }
        if !canvas.bounds.contains(page) {
            tracing::debug!(kind, "template released outside the canvas; no drop");
            return false;
        }
        let local = canvas.bounds.to_local(page);
        tracing::info!(kind, x = local.x, y = local.y, "placement requested");
        self.placements.publish(&PlacementRequested { kind: kind.to_string(), x: local.x, y: local.y });
        true
    }

    /// Move an item in the store and in the connection library. A library
    /// failure is logged; the gesture continues.
    fn place(&mut self, id: &ItemId, pos: Point) {
        self.items.set_position(id, pos);
        if let Err(err) = self.plumb.move_item(id, pos) {
            tracing::warn!(%id, %err, "connection library failed to move item");
        }
    }

    /// Where an item lands for a pointer at `page`, kept inside the canvas.
    fn contained_position(&self, id: &ItemId, page: Point, grab: Point) -> Option<Point> {
        let canvas = self.canvas.as_ref()?;
        let item = self.items.get(id)?;
        let desired = canvas.bounds.to_local(page).sub(grab);
        Some(contain(desired, item.size(), canvas.bounds.size()))
    }

    /// End whatever gesture is in progress without emitting its events.
    fn abandon_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::DraggingTemplate { kind, .. } => {
                tracing::warn!(kind = %kind, "new drag started before the previous one stopped");
                vec![Action::RemoveHelper]
            }
            InputState::DraggingItem { id, orig_x, orig_y, .. } => {
                tracing::warn!(%id, "new drag started before the previous one stopped");
                self.place(&id, Point::new(orig_x, orig_y));
                vec![Action::ItemPositioned { id, x: orig_x, y: orig_y }]
            }
            InputState::Ignored => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Canvas bounds in page coordinates, once initialized.
    #[must_use]
    pub fn canvas_bounds(&self) -> Option<Rect> {
        self.canvas.as_ref().map(|c| c.bounds)
    }

    /// Selector the canvas was initialized from.
    #[must_use]
    pub fn canvas_selector(&self) -> Option<&str> {
        self.canvas.as_ref().map(|c| c.selector.as_str())
    }

    #[must_use]
    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&CanvasItem> {
        self.items.get(id)
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_active()
    }

    #[must_use]
    pub fn plumb(&self) -> &P {
        &self.plumb
    }

    pub fn plumb_mut(&mut self) -> &mut P {
        &mut self.plumb
    }
}
