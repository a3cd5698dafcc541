//! Key-value store abstraction
//!
//! Handles browser/native differences for persisted slots:
//! - `MemoryStore`: in-process, used by tests and as a last resort
//! - `FileStore`: one file per key in a data directory (native)
//! - `LocalStorage`: `window.localStorage` (web)
//!
//! All access is single-threaded, so stores take `&self` and are shared
//! through `Rc`.

use std::rc::Rc;

use crate::error::StoreResult;

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(target_arch = "wasm32")]
pub mod local;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Shared handle to a store
pub type StoreHandle = Rc<dyn KeyValueStore>;

/// A string-valued key-value store.
///
/// Writes are atomic per key: a failed write leaves the previous value.
pub trait KeyValueStore {
    /// Read a slot. An absent slot is `Ok(None)`.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite a slot.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a slot. Removing an absent slot succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
