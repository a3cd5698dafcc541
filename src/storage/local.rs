//! `window.localStorage` store (WASM only)

use wasm_bindgen::{JsCast, JsValue};

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// Browser LocalStorage
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's LocalStorage. Fails when there is no window or the
    /// browser has storage disabled.
    pub fn open() -> StoreResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error(&e))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

fn js_error(err: &JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", err))
}

impl KeyValueStore for LocalStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage.get_item(key).map_err(|e| js_error(&e))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.storage.set_item(key, value).map_err(|e| {
            let quota = e
                .dyn_ref::<web_sys::DomException>()
                .map(|ex| ex.name() == "QuotaExceededError")
                .unwrap_or(false);
            if quota {
                StoreError::QuotaExceeded {
                    key: key.to_string(),
                    limit: 0,
                }
            } else {
                js_error(&e)
            }
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.storage.remove_item(key).map_err(|e| js_error(&e))
    }

    fn name(&self) -> &'static str {
        "localStorage"
    }
}
