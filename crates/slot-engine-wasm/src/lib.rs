//! WASM bindings for slot-engine.
//!
//! Exposes common-free-time search and interval merging to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings; the JSON
//! handling lives in [`bridge`] and the exports here only convert errors.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/slot-engine-js/wasm/slot_engine_wasm.js \
//!    packages/slot-engine-js/wasm/slot_engine_wasm.cjs
//! ```

pub mod bridge;

use wasm_bindgen::prelude::*;

/// Find the slots where every attendee is free.
///
/// `input_json` is an object with `window_start` (ISO 8601), `attendees`
/// (`{name, email}` objects), `busy` (email to array of `{start, end}`) and
/// optionally `working_hours` (email to `{start, end}` fractional hours).
/// `settings_json` may be empty for defaults; missing fields take defaults.
///
/// Returns a JSON object with `window_start`, `window_end`, `slots` (each with
/// `start`, `end`, `duration_minutes` and attendee emails) and
/// `unknown_attendees`.
#[wasm_bindgen(js_name = "findAvailableSlots")]
pub fn find_available_slots(input_json: &str, settings_json: &str) -> Result<String, JsValue> {
    bridge::find_available_slots(input_json, settings_json).map_err(|e| JsValue::from_str(&e))
}

/// Sort and coalesce overlapping or touching intervals.
///
/// Takes and returns a JSON array of `{start, end}` objects.
#[wasm_bindgen(js_name = "mergeIntervals")]
pub fn merge_intervals(intervals_json: &str) -> Result<String, JsValue> {
    bridge::merge_intervals(intervals_json).map_err(|e| JsValue::from_str(&e))
}

/// The default settings as a JSON object.
#[wasm_bindgen(js_name = "defaultSettings")]
pub fn default_settings() -> Result<String, JsValue> {
    bridge::default_settings().map_err(|e| JsValue::from_str(&e))
}
