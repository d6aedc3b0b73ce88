use canvas::CanvasError;
use wasm_bindgen::JsValue;

/// Errors surfaced to JavaScript by the page layer.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid endpoint id `{0}`")]
    InvalidEndpointId(String),

    #[error("browser environment unavailable: {0}")]
    NoBrowser(&'static str),

    #[error("controller is busy; a callback called back into it during a gesture")]
    Reentrant,

    #[error("javascript error: {0}")]
    Js(String),
}

impl BridgeError {
    /// Wrap a thrown JavaScript value.
    pub(crate) fn js(context: &str, err: &JsValue) -> Self {
        let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        Self::Js(format!("{context}: {detail}"))
    }
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
