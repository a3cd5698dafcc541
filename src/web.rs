//! Browser entry points (WASM only)

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::app::{AppContext, AppOptions};
use crate::demos::Router;
use crate::storage::{LocalStorage, MemoryStore, StoreHandle};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by the host page
        return;
    }
    log::info!("UI notes starting...");
}

/// Demo session bound to `window.localStorage`
#[wasm_bindgen]
pub struct Notes {
    ctx: AppContext,
    router: Router,
}

#[wasm_bindgen]
impl Notes {
    /// Falls back to an in-memory store when LocalStorage is unavailable
    #[wasm_bindgen(constructor)]
    pub fn new() -> Notes {
        let store: StoreHandle = match LocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::warn!("{}; demos will not persist", e);
                Rc::new(MemoryStore::new())
            }
        };
        let ctx = AppContext::init(store, AppOptions::default());
        let router = Router::with_defaults(&ctx);
        Notes { ctx, router }
    }

    /// Demo keys, in routing order
    pub fn demos(&self) -> js_sys::Array {
        self.router.keys().map(JsValue::from_str).collect()
    }

    /// Run one command line and return the rendered result
    pub fn dispatch(&mut self, line: &str) -> String {
        let out = match self.router.dispatch_line(&mut self.ctx, line) {
            Ok(text) => text,
            Err(e) => format!("error: {}", e),
        };
        self.router.flush_all();
        out
    }

    /// Current time for debounce commands
    pub fn now_ms() -> f64 {
        js_sys::Date::now()
    }
}

impl Default for Notes {
    fn default() -> Self {
        Self::new()
    }
}
