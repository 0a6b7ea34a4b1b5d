//! Session error types

use thiserror::Error;

/// Failures while setting up a session. The simulation itself cannot fail.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No global window")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Missing element #{0}")]
    MissingElement(String),
    #[error("Canvas has no 2d context")]
    NoContext2d,
    #[error("JS error: {0}")]
    Js(String),
    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SessionError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SessionError::Js(format!("{:?}", value))
    }
}
