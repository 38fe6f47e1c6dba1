//! `window.localStorage` as a credential backend

use fitrack_core::{CoreError, CoreResult, KeyValueStore};
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// Values are stored as raw strings, not JSON-encoded, so the token stays
/// readable by anything else on the page that expects it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn storage_error(op: &str, key: &str, err: &JsValue) -> CoreError {
    CoreError::storage(format!("localStorage {op} '{key}' failed: {err:?}"))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| storage_error("read", key, &e))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| storage_error("write", key, &e))
    }

    fn delete(&self, key: &str) -> CoreResult<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| storage_error("delete", key, &e))
    }
}
