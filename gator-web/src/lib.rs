#![forbid(unsafe_code)]
//! Browser surface for the GATOR calculator: wasm exports of the scoring
//! engine and a `localStorage` history store.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod bindings;
pub mod storage;

pub use gator_core::*;
pub use storage::{WebHistoryStorage, WebStorageError};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
