//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod session;

pub use landmarks::{snapshot_from_flat, snapshot_to_flat, FLAT_LENGTH, VALUES_PER_LANDMARK};
pub use session::{exercise_types, PoseSession};
