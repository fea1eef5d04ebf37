use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: f64, height: f64 },

    #[error("invalid pointer position ({x}, {y})")]
    InvalidPointer { x: f64, y: f64 },

    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    #[error("drawing failed: {0}")]
    Surface(String),

    #[error("frame scheduling failed: {0}")]
    Scheduler(String),
}

impl FieldError {
    // Render a JS exception into something loggable
    pub fn from_js(value: &JsValue, wrap: fn(String) -> FieldError) -> FieldError {
        wrap(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
