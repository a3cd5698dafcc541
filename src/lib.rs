//! UI Notes - runnable notes on UI framework concepts
//!
//! Core modules:
//! - `persisted`: Value mirrored into a key-value store (hydrate, sync, reset)
//! - `storage`: Store backends (memory, files, browser LocalStorage)
//! - `app`: Explicit shared state container with init/teardown
//! - `hooks`: Reducer, debounce and memo primitives
//! - `demos`: Demo variants and the routing table that selects them
//! - `settings`: Persisted preferences

pub mod app;
pub mod demos;
pub mod error;
pub mod hooks;
pub mod persisted;
pub mod settings;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{AppContext, AppOptions};
pub use demos::{Demo, DemoError, Router};
pub use error::{PersistError, StoreError, StoreOp};
pub use persisted::{Hydration, Persisted, SyncState, Update};
pub use settings::Settings;
pub use storage::{KeyValueStore, MemoryStore, StoreHandle};

/// Application constants
pub mod consts {
    /// Prefix for every slot key
    pub const DEFAULT_NAMESPACE: &str = "ui_notes";
    /// Directory name under the platform data dir (native)
    pub const DATA_DIR_NAME: &str = "ui-notes";
    /// Used when the platform has no data dir (native)
    pub const FALLBACK_DATA_DIR: &str = ".ui-notes";
}
