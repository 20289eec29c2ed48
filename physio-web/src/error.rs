//! Error types
//!
//! Only configuration problems are errors. Bad frames degrade the output
//! instead (missing angles, zero confidence), so nothing per-frame returns
//! `Result`.

use thiserror::Error;

/// A specialized `Result` for session setup
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Problems detected once, at session start
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown exercise type '{0}'")]
    UnknownExercise(String),

    #[error("confidence floor must be within [0, 1], got {0}")]
    InvalidConfidenceFloor(f32),

    #[error("smoothing window must be within [1, 1024] samples, got {0}")]
    InvalidSmoothingWindow(usize),

    #[error("mirror width must be positive and finite, got {0}")]
    InvalidMirrorWidth(f32),
}

impl From<ConfigError> for wasm_bindgen::JsValue {
    fn from(err: ConfigError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
