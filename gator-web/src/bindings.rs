//! JavaScript entry points.
//!
//! Inputs and results cross the boundary as plain objects using the same
//! field names as the serialized Rust records.

use gator_core::{GatorInputs, HistoryBook, weapons};
use wasm_bindgen::prelude::*;

use crate::storage::{WebHistoryStorage, timestamp_from_js_millis};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn inputs_from_js(inputs: JsValue) -> Result<GatorInputs, JsValue> {
    if inputs.is_undefined() || inputs.is_null() {
        return Ok(GatorInputs::default());
    }
    serde_wasm_bindgen::from_value(inputs).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn open_book() -> HistoryBook<WebHistoryStorage> {
    HistoryBook::open(WebHistoryStorage::default())
}

/// Score a set of inputs; missing fields take the form's defaults.
///
/// # Errors
/// Returns an error if `inputs` is not shaped like `GatorInputs`.
#[wasm_bindgen(js_name = computeGator)]
pub fn compute_gator(inputs: JsValue) -> Result<JsValue, JsValue> {
    let inputs = inputs_from_js(inputs)?;
    to_js(&inputs.compute())
}

/// Default inputs, as shown on a fresh form.
///
/// # Errors
/// Returns an error if serialization fails.
#[wasm_bindgen(js_name = defaultInputs)]
pub fn default_inputs() -> Result<JsValue, JsValue> {
    to_js(&GatorInputs::default())
}

/// Stored history, newest first.
///
/// # Errors
/// Returns an error if serialization fails.
#[wasm_bindgen(js_name = loadHistory)]
pub fn load_history() -> Result<JsValue, JsValue> {
    to_js(open_book().history())
}

/// Score `inputs`, record the result and return the new record.
///
/// # Errors
/// Returns an error if `inputs` is malformed.
#[wasm_bindgen(js_name = commitScore)]
pub fn commit_score(inputs: JsValue) -> Result<JsValue, JsValue> {
    let inputs = inputs_from_js(inputs)?;
    let result = inputs.compute();
    let mut book = open_book();
    let record = book.commit(&result, timestamp_from_js_millis(js_sys::Date::now()));
    to_js(record)
}

#[wasm_bindgen(js_name = clearHistory)]
pub fn clear_history() {
    open_book().clear();
}

/// Bundled weapon range profiles.
///
/// # Errors
/// Returns an error if serialization fails.
#[wasm_bindgen(js_name = weaponCatalog)]
pub fn weapon_catalog() -> Result<JsValue, JsValue> {
    to_js(weapons::catalog())
}
