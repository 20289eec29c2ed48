//! Physio Web - kinematic feedback engine for exercise sessions
//!
//! Turns per-frame pose landmarks into joint angles, repetition counts,
//! corrective feedback and form scores. The engine itself is plain Rust
//! (usable natively); the `bridge` module exposes it to the browser.
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod analysis;
pub mod bridge;
pub mod config;
pub mod error;
pub mod kinematics;
pub mod model;
pub mod session;

use wasm_bindgen::prelude::*;

pub use bridge::{exercise_types, PoseSession};
pub use config::EngineConfig;
pub use error::{ConfigError, Result};
pub use model::{
    ExerciseType, FeedbackMessage, FeedbackType, FrameReport, JointAngleSet, JointName, Landmark,
    LandmarkName, Phase, PoseSnapshot, RepState, ScoreSet,
};
pub use session::{ExerciseSession, SessionSummary};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console.
///
/// Level: "trace", "debug", "info", "warn" or "error" (default "info").
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("physio-web {} logging at {}", env!("CARGO_PKG_VERSION"), log_level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
