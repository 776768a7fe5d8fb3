//! `localStorage`-backed score history.

use gator_core::{HISTORY_STORAGE_KEY, HistoryError, HistoryStorage, ScoreRecord};
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl From<StorageError> for WebStorageError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SerdeError(err) => Self::History(HistoryError::from(err)),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Interpret a stored-history read; a missing key is an empty history.
///
/// # Errors
///
/// Returns an error if a stored payload exists but is not a record array.
pub fn stored_records(
    read: Result<Vec<ScoreRecord>, StorageError>,
) -> Result<Vec<ScoreRecord>, WebStorageError> {
    match read {
        Ok(records) => Ok(records),
        Err(StorageError::KeyNotFound(_)) => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

/// Convert a `Date.now()` reading into whole milliseconds.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)] // Clamped to the u64 range first.
pub fn timestamp_from_js_millis(millis: f64) -> u64 {
    if !millis.is_finite() || millis <= 0.0 {
        return 0;
    }
    millis.floor().min(u64::MAX as f64) as u64
}

/// Score history stored as a JSON array under one `localStorage` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebHistoryStorage {
    key: String,
}

impl Default for WebHistoryStorage {
    fn default() -> Self {
        Self::with_key(HISTORY_STORAGE_KEY)
    }
}

impl WebHistoryStorage {
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl HistoryStorage for WebHistoryStorage {
    type Error = WebStorageError;

    fn load(&self) -> Result<Vec<ScoreRecord>, Self::Error> {
        stored_records(LocalStorage::get(&self.key)).inspect_err(|err| {
            console_error(&format!("Stored score history unreadable: {err}"));
        })
    }

    fn save(&self, records: &[ScoreRecord]) -> Result<(), Self::Error> {
        LocalStorage::set(&self.key, records)
            .map_err(WebStorageError::from)
            .inspect_err(|err| {
                console_error(&format!("Failed to save score history: {err}"));
            })
    }
}
