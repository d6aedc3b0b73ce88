//! The `PageController` exported to JavaScript.
//!
//! Page scripts construct one per canvas, wire their gesture library's drag
//! callbacks to the `dragStart*`/`dragMove`/`dragStop` methods, and apply the
//! returned actions to the DOM. Events are delivered to plain JS callbacks
//! after the call that raised them has released the controller, so a
//! callback may call `appendItem` and friends.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use canvas::doc::ItemId;
use canvas::endpoint::EndpointId;
use canvas::geometry::Point;
use canvas::input::DragSource;
use canvas::{Action, CanvasController, CanvasError, ControllerConfig};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::dom::DomPage;
use crate::error::BridgeError;
use crate::logging;
use crate::plumb::JsPlumb;
use crate::session::{Outgoing, Session};

/// Serialize through JSON so the JS side sees plain objects.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, BridgeError> {
    let raw = serde_json::to_string(value)?;
    js_sys::JSON::parse(&raw).map_err(|err| BridgeError::js("JSON.parse", &err))
}

fn parse_endpoint(raw: &str) -> Result<EndpointId, BridgeError> {
    EndpointId::parse_str(raw).map_err(|_| BridgeError::InvalidEndpointId(raw.to_string()))
}

fn actions(actions: &[Action]) -> Result<JsValue, BridgeError> {
    to_js(actions)
}

/// A registered JS callback.
enum Listener {
    Placement(Function),
    ItemMoved(Function),
}

impl Listener {
    fn callback_for(&self, event: &Outgoing) -> Option<&Function> {
        match (self, event) {
            (Self::Placement(f), Outgoing::Placement(_)) | (Self::ItemMoved(f), Outgoing::ItemMoved(_)) => Some(f),
            _ => None,
        }
    }
}

#[wasm_bindgen]
pub struct PageController {
    session: Session<JsPlumb>,
    page: DomPage,
    listeners: RefCell<BTreeMap<u32, Listener>>,
    next_handle: Cell<u32>,
}

#[wasm_bindgen]
impl PageController {
    /// `config_json` may be empty for defaults. `plumb` is a jsPlumb instance.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, plumb: JsValue) -> Result<PageController, BridgeError> {
        let config = if config_json.trim().is_empty() {
            ControllerConfig::default()
        } else {
            ControllerConfig::from_json(config_json)?
        };
        logging::init(&config.log_level);

        let page = DomPage::from_window()?;
        let inner = CanvasController::new(config, JsPlumb::new(plumb)?)?;
        tracing::info!("page controller created");
        Ok(Self {
            session: Session::new(inner),
            page,
            listeners: RefCell::new(BTreeMap::new()),
            next_handle: Cell::new(0),
        })
    }

    /// Returns the templates found, as `[{kind, label}]`.
    #[wasm_bindgen(js_name = initPalette)]
    pub fn init_palette(&self, palette_selector: &str, canvas_selector: &str) -> Result<JsValue, BridgeError> {
        let templates = self.run(|c| {
            c.initialize_palette(&self.page, palette_selector, canvas_selector).map(|p| p.templates().to_vec())
        })??;
        to_js(&templates)
    }

    /// Returns the canvas bounds in page coordinates.
    #[wasm_bindgen(js_name = initCanvas)]
    pub fn init_canvas(&self, canvas_selector: &str) -> Result<JsValue, BridgeError> {
        let bounds = self.run(|c| c.initialize_canvas(&self.page, canvas_selector))??;
        to_js(&bounds)
    }

    /// Re-measure the canvas after a layout change.
    #[wasm_bindgen(js_name = refreshCanvas)]
    pub fn refresh_canvas(&self) -> Result<JsValue, BridgeError> {
        let selector = self
            .run(|c| c.canvas_selector().map(str::to_string))?
            .ok_or(CanvasError::CanvasNotInitialized)?;
        self.init_canvas(&selector)
    }

    /// Returns how many elements became draggable.
    #[wasm_bindgen(js_name = enableItemDragging)]
    pub fn enable_item_dragging(&self, item_selector: &str) -> Result<usize, BridgeError> {
        Ok(self.run(|c| c.enable_item_dragging(&self.page, item_selector))??)
    }

    // --- Items ---

    #[wasm_bindgen(js_name = appendItem)]
    pub fn append_item(&self, kind: &str, x: f64, y: f64) -> Result<String, BridgeError> {
        Ok(self.run(|c| c.append_item(kind, Point::new(x, y)))?.to_string())
    }

    #[wasm_bindgen(js_name = insertItem)]
    pub fn insert_item(&self, index: usize, kind: &str, x: f64, y: f64) -> Result<String, BridgeError> {
        Ok(self.run(|c| c.insert_item(index, kind, Point::new(x, y)))??.to_string())
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&self, id: &str) -> Result<(), BridgeError> {
        self.run(|c| c.remove_item(&ItemId::from(id)))??;
        Ok(())
    }

    /// All items in document order.
    pub fn items(&self) -> Result<JsValue, BridgeError> {
        let items = self.run(|c| c.items().as_slice().to_vec())?;
        to_js(&items)
    }

    // --- Endpoints ---

    #[wasm_bindgen(js_name = addSourceEndpoint)]
    pub fn add_source_endpoint(&self, item_id: &str) -> Result<String, BridgeError> {
        Ok(self.run(|c| c.add_source_endpoint(&ItemId::from(item_id)))??.to_string())
    }

    #[wasm_bindgen(js_name = addTargetEndpoint)]
    pub fn add_target_endpoint(&self, item_id: &str) -> Result<String, BridgeError> {
        Ok(self.run(|c| c.add_target_endpoint(&ItemId::from(item_id)))??.to_string())
    }

    pub fn connect(&self, from: &str, to: &str) -> Result<String, BridgeError> {
        let (from, to) = (parse_endpoint(from)?, parse_endpoint(to)?);
        Ok(self.run(|c| c.connect(from, to))??.to_string())
    }

    // --- Gestures ---

    #[wasm_bindgen(js_name = dragStartTemplate)]
    pub fn drag_start_template(&self, kind: &str, page_x: f64, page_y: f64) -> Result<JsValue, BridgeError> {
        let source = DragSource::Template { kind: kind.to_string() };
        actions(&self.run(|c| c.on_drag_start(source, Point::new(page_x, page_y)))?)
    }

    #[wasm_bindgen(js_name = dragStartItem)]
    pub fn drag_start_item(&self, id: &str, page_x: f64, page_y: f64) -> Result<JsValue, BridgeError> {
        let source = DragSource::Item { id: ItemId::from(id) };
        actions(&self.run(|c| c.on_drag_start(source, Point::new(page_x, page_y)))?)
    }

    /// A drag began on something that is neither a template nor an item.
    #[wasm_bindgen(js_name = dragStartForeign)]
    pub fn drag_start_foreign(&self, page_x: f64, page_y: f64) -> Result<JsValue, BridgeError> {
        actions(&self.run(|c| c.on_drag_start(DragSource::Foreign, Point::new(page_x, page_y)))?)
    }

    #[wasm_bindgen(js_name = dragMove)]
    pub fn drag_move(&self, page_x: f64, page_y: f64) -> Result<JsValue, BridgeError> {
        actions(&self.run(|c| c.on_drag_move(Point::new(page_x, page_y)))?)
    }

    #[wasm_bindgen(js_name = dragStop)]
    pub fn drag_stop(&self, page_x: f64, page_y: f64) -> Result<JsValue, BridgeError> {
        actions(&self.run(|c| c.on_drag_stop(Point::new(page_x, page_y)))?)
    }

    // --- Events ---

    /// `callback({kind, x, y})` runs when a template is dropped on the
    /// canvas. Returns a handle for [`Self::off`].
    #[wasm_bindgen(js_name = onPlacementRequested)]
    pub fn on_placement_requested(&self, callback: Function) -> u32 {
        self.register(Listener::Placement(callback))
    }

    /// `callback({index, id, x, y})` runs when an item drag finishes.
    #[wasm_bindgen(js_name = onItemMoved)]
    pub fn on_item_moved(&self, callback: Function) -> u32 {
        self.register(Listener::ItemMoved(callback))
    }

    /// Remove a callback. Returns false for an unknown handle.
    pub fn off(&self, handle: u32) -> bool {
        self.listeners.borrow_mut().remove(&handle).is_some()
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> Result<bool, BridgeError> {
        self.run(|c| c.is_dragging())
    }
}

impl PageController {
    /// Run `f` on the controller, then deliver whatever events it raised.
    fn run<R>(&self, f: impl FnOnce(&mut CanvasController<JsPlumb>) -> R) -> Result<R, BridgeError> {
        let out = self.session.with(f)?;
        self.flush();
        Ok(out)
    }

    fn flush(&self) {
        self.session.dispatch(|_, event| {
            let callbacks: Vec<Function> =
                self.listeners.borrow().values().filter_map(|l| l.callback_for(&event)).cloned().collect();
            if callbacks.is_empty() {
                return;
            }
            let payload = match to_js(&event) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::warn!(%err, "event payload could not be converted");
                    return;
                }
            };
            for callback in callbacks {
                if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                    tracing::warn!(error = ?err, "event callback threw");
                }
            }
        });
    }

    fn register(&self, listener: Listener) -> u32 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle.wrapping_add(1));
        self.listeners.borrow_mut().insert(handle, listener);
        handle
    }
}
