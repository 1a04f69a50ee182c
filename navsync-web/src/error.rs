use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("element `{0}` is not an HTMLElement")]
    NotHtmlElement(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}
