//! `Plumb` backed by a jsPlumb instance handed in from JavaScript.
//!
//! Every call goes through `Reflect` on the instance, so any jsPlumb build
//! exposing `setContainer`, `addEndpoint`, `connect`, `revalidate` and
//! `remove` works. Endpoint handles returned by `addEndpoint` are kept so
//! `connect` can pass them back.
//!
//! jsPlumb's own drag support is not used. The page's gesture library feeds
//! the controller, the controller clamps, and `move_item` writes the clamped
//! position to the element before asking jsPlumb to repaint its endpoints.

#[cfg(test)]
#[path = "plumb_test.rs"]
mod plumb_test;

use std::collections::{HashMap, HashSet};

use canvas::CanvasError;
use canvas::doc::ItemId;
use canvas::endpoint::{Endpoint, EndpointId, EndpointRole, EndpointShape};
use canvas::geometry::{Point, Size};
use canvas::page::ElementInfo;
use canvas::plumb::{ConnectionId, Plumb};
use js_sys::{Array, Function, Reflect};
use serde_json::{Value, json};
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::error::BridgeError;

/// jsPlumb's value for "no connection limit".
const UNLIMITED: i64 = -1;

/// What has been registered against the current container. `H` is the
/// library's endpoint handle.
struct Registry<H> {
    draggables: HashSet<ItemId>,
    endpoints: HashMap<EndpointId, (ItemId, H)>,
}

impl<H> Registry<H> {
    fn new() -> Self {
        Self { draggables: HashSet::new(), endpoints: HashMap::new() }
    }

    fn handle(&self, id: &EndpointId) -> Result<&H, CanvasError> {
        self.endpoints.get(id).map(|(_, h)| h).ok_or(CanvasError::UnknownEndpoint(*id))
    }

    fn has_endpoints(&self, item: &ItemId) -> bool {
        self.endpoints.values().any(|(owner, _)| owner == item)
    }

    fn forget_item(&mut self, item: &ItemId) {
        self.draggables.remove(item);
        self.endpoints.retain(|_, (owner, _)| owner != item);
    }

    /// Called when the container changes; old handles point into a dead container.
    fn reset(&mut self) {
        self.draggables.clear();
        self.endpoints.clear();
    }
}

pub struct JsPlumb {
    instance: JsValue,
    document: Document,
    registry: Registry<JsValue>,
}

impl JsPlumb {
    /// Wrap a jsPlumb instance for the current document.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NoBrowser`] outside a browser page.
    pub fn new(instance: JsValue) -> Result<Self, BridgeError> {
        let document = web_sys::window()
            .ok_or(BridgeError::NoBrowser("window"))?
            .document()
            .ok_or(BridgeError::NoBrowser("document"))?;
        Ok(Self { instance, document, registry: Registry::new() })
    }

    /// Call `method` on the instance with `args`.
    fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue, CanvasError> {
        let func = Reflect::get(&self.instance, &JsValue::from_str(method))
            .map_err(|err| plumb_error(method, &err))?
            .dyn_into::<Function>()
            .map_err(|_| CanvasError::Plumb(format!("jsPlumb instance has no `{method}` function")))?;
        let args: Array = args.iter().collect();
        func.apply(&self.instance, &args).map_err(|err| plumb_error(method, &err))
    }

    fn element(&self, item: &ItemId) -> Result<HtmlElement, CanvasError> {
        self.document
            .get_element_by_id(item.as_str())
            .ok_or_else(|| CanvasError::UnknownItem(item.clone()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CanvasError::Plumb(format!("`{item}` is not an HTML element")))
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), CanvasError> {
        el.style().set_property(property, value).map_err(|err| plumb_error("style", &err))
    }
}

fn plumb_error(method: &str, err: &JsValue) -> CanvasError {
    CanvasError::Plumb(BridgeError::js(method, err).to_string())
}

fn to_js(value: &Value) -> Result<JsValue, CanvasError> {
    js_sys::JSON::parse(&value.to_string()).map_err(|err| plumb_error("JSON.parse", &err))
}

/// CSS pixel length.
fn px(v: f64) -> String {
    format!("{v}px")
}

/// jsPlumb `addEndpoint` options for an endpoint.
pub(crate) fn endpoint_options(endpoint: &Endpoint) -> Value {
    let style = &endpoint.style;
    let shape = match style.shape {
        EndpointShape::Dot { radius } => json!(["Dot", { "radius": radius }]),
        EndpointShape::Rectangle { width, height } => json!(["Rectangle", { "width": width, "height": height }]),
    };
    let max_connections = style.max_connections.map_or(UNLIMITED, |n| i64::try_from(n).unwrap_or(i64::MAX));
    json!({
        "uuid": endpoint.id.to_string(),
        "anchor": style.anchor,
        "endpoint": shape,
        "paintStyle": { "fill": style.color },
        "isSource": endpoint.role == EndpointRole::Source,
        "isTarget": endpoint.role == EndpointRole::Target,
        "maxConnections": max_connections,
    })
}

impl Plumb for JsPlumb {
    fn set_container(&mut self, container: &ElementInfo) -> Result<(), CanvasError> {
        let id = container
            .id
            .as_deref()
            .ok_or_else(|| CanvasError::Plumb("canvas element needs an id to be the jsPlumb container".into()))?;
        self.call("setContainer", &[JsValue::from_str(id)])?;
        self.registry.reset();
        Ok(())
    }

    fn make_draggable(&mut self, item: &ItemId, _containment: Size) -> Result<(), CanvasError> {
        // Positioned by `move_item`; containment is the controller's job.
        let el = self.element(item)?;
        Self::set_style(&el, "position", "absolute")?;
        self.registry.draggables.insert(item.clone());
        Ok(())
    }

    fn move_item(&mut self, item: &ItemId, pos: Point) -> Result<(), CanvasError> {
        let el = self.element(item)?;
        Self::set_style(&el, "left", &px(pos.x))?;
        Self::set_style(&el, "top", &px(pos.y))?;
        if self.registry.has_endpoints(item) {
            self.call("revalidate", &[JsValue::from_str(item.as_str())])?;
        }
        Ok(())
    }

    fn add_endpoint(&mut self, endpoint: &Endpoint) -> Result<(), CanvasError> {
        let options = to_js(&endpoint_options(endpoint))?;
        let handle = self.call("addEndpoint", &[JsValue::from_str(endpoint.item.as_str()), options])?;
        self.registry.endpoints.insert(endpoint.id, (endpoint.item.clone(), handle));
        Ok(())
    }

    fn connect(&mut self, from: &Endpoint, to: &Endpoint) -> Result<ConnectionId, CanvasError> {
        let params = js_sys::Object::new();
        for (key, id) in [("source", &from.id), ("target", &to.id)] {
            Reflect::set(&params, &JsValue::from_str(key), self.registry.handle(id)?)
                .map_err(|err| plumb_error("connect", &err))?;
        }
        let connection = self.call("connect", &[params.into()])?;
        if connection.is_null() || connection.is_undefined() {
            return Err(CanvasError::Plumb("jsPlumb refused the connection".into()));
        }
        Ok(Uuid::new_v4())
    }

    fn remove_element(&mut self, item: &ItemId) -> Result<(), CanvasError> {
        self.call("remove", &[JsValue::from_str(item.as_str())])?;
        self.registry.forget_item(item);
        Ok(())
    }
}
