//! Session handles exported to JavaScript
//!
//! Each `PoseSession` owns its engine state. The page creates one per
//! tracked subject and calls `free()` (or drops the reference) when the
//! exercise ends; nothing is stashed in module-level storage.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::landmarks::snapshot_from_flat;
use crate::config::EngineConfig;
use crate::model::{ExerciseType, PoseSnapshot};
use crate::session::ExerciseSession;

#[wasm_bindgen]
pub struct PoseSession {
    inner: ExerciseSession,
}

#[wasm_bindgen]
impl PoseSession {
    /// Start a session. `config` may be `undefined` or a partial
    /// `{ confidenceFloor, smoothingWindow, mirrorWidth }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(exercise: &str, config: JsValue) -> Result<PoseSession, JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let inner = ExerciseSession::from_name(exercise, config)?;
        Ok(PoseSession { inner })
    }

    /// Process one frame from a flat Float32Array (17 x [x, y, confidence]).
    /// A malformed buffer is treated as a frame with no pose.
    #[wasm_bindgen(js_name = updateLandmarks)]
    pub fn update_landmarks(&mut self, data: &[f32], timestamp: Option<f64>) -> Result<JsValue, JsValue> {
        let snapshot = snapshot_from_flat(data).unwrap_or_default();
        self.process(&snapshot, timestamp)
    }

    /// Process one frame from an array of `{ name, x, y, confidence }` objects.
    /// Unknown names are skipped; anything that is not an array is a frame
    /// with no pose.
    pub fn update(&mut self, landmarks: JsValue, timestamp: Option<f64>) -> Result<JsValue, JsValue> {
        let snapshot = serde_wasm_bindgen::from_value::<PoseSnapshot>(landmarks).unwrap_or_else(|err| {
            log::warn!("Invalid landmark objects: {}", err);
            PoseSnapshot::default()
        });
        self.process(&snapshot, timestamp)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter, js_name = repCount)]
    pub fn rep_count(&self) -> u32 {
        self.inner.rep_state().count
    }

    #[wasm_bindgen(getter)]
    pub fn exercise(&self) -> String {
        self.inner.exercise().to_string()
    }

    /// Running summary for the persistence layer
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.summary())
    }

    /// Static profile (reference angles, thresholds) for display
    pub fn profile(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.profile())
    }
}

impl PoseSession {
    fn process(&mut self, snapshot: &PoseSnapshot, timestamp: Option<f64>) -> Result<JsValue, JsValue> {
        let timestamp = timestamp.unwrap_or_else(js_sys::Date::now);
        let report = self.inner.process_frame(snapshot, timestamp);
        to_js(&report)
    }
}

/// Supported exercise names, for populating pickers
#[wasm_bindgen(js_name = exerciseTypes)]
pub fn exercise_types() -> js_sys::Array {
    ExerciseType::ALL
        .iter()
        .map(|e| JsValue::from_str(e.as_str()))
        .collect()
}

/// Plain objects (not `Map`s) so the page can JSON.stringify directly
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}
