//! Persisted value: an in-memory value mirrored into one store slot
//!
//! - Hydrate: the slot is read once on `create`; absent or unreadable data
//!   falls back to the default.
//! - Sync: every `set`/`update` serializes the new value and queues a write;
//!   `flush` drives queued writes to the store in call order.
//! - Reset: restores the default, drops queued writes and removes the slot.
//!
//! Store failures never reach the caller. They are logged at `warn`, kept in
//! `last_error`, and the value keeps working in memory.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PersistError, StoreError, StoreOp};
use crate::storage::StoreHandle;

/// Whether a write is waiting to reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Hydrated,
    Syncing,
}

/// Where the initial value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Parsed from the stored slot
    Stored,
    /// Slot was absent
    Default,
    /// Slot was unreadable (store error or bad data)
    Fallback,
}

/// A replacement: either a literal value or a function of the previous one
pub enum Update<T> {
    Replace(T),
    With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    pub fn with<F: FnOnce(&T) -> T + 'static>(f: F) -> Self {
        Update::With(Box::new(f))
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Replace(value)
    }
}

/// A value of type `T` kept in sync with the slot `key`.
///
/// One instance owns its slot; two live instances on the same key will
/// overwrite each other's writes.
pub struct Persisted<T> {
    store: StoreHandle,
    key: String,
    default: T,
    value: T,
    pending: VecDeque<String>,
    hydration: Hydration,
    last_error: Option<PersistError>,
}

impl<T> Persisted<T> {
    /// Current in-memory value
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn hydrated_from(&self) -> Hydration {
        self.hydration
    }

    pub fn sync_state(&self) -> SyncState {
        if self.pending.is_empty() {
            SyncState::Hydrated
        } else {
            SyncState::Syncing
        }
    }

    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Most recent recovered error, if any
    pub fn last_error(&self) -> Option<&PersistError> {
        self.last_error.as_ref()
    }

    /// Write every queued snapshot to the store, oldest first.
    ///
    /// Returns the number of writes attempted. Failed writes are logged and
    /// dropped; the slot keeps whatever the store last accepted.
    pub fn flush(&mut self) -> usize {
        let mut attempted = 0;
        while let Some(raw) = self.pending.pop_front() {
            attempted += 1;
            if let Err(source) = self.store.write(&self.key, &raw) {
                self.recover(PersistError::Persistence {
                    key: self.key.clone(),
                    op: StoreOp::Write,
                    source,
                });
            }
        }
        if attempted > 0 {
            log::debug!("Flushed {} write(s) to {}", attempted, self.key);
        }
        attempted
    }

    fn recover(&mut self, err: PersistError) {
        log::warn!("{}; continuing in memory", err);
        self.last_error = Some(err);
    }
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Hydrate from `key`, falling back to `default`. Never fails.
    pub fn create(store: StoreHandle, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let mut persisted = Self {
            store,
            key,
            value: default.clone(),
            default,
            pending: VecDeque::new(),
            hydration: Hydration::Default,
            last_error: None,
        };
        persisted.hydrate();
        persisted
    }

    fn hydrate(&mut self) {
        match self.store.read(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    log::debug!("Hydrated {} from {}", self.key, self.store.name());
                    self.value = value;
                    self.hydration = Hydration::Stored;
                }
                Err(source) => {
                    self.hydration = Hydration::Fallback;
                    self.recover(PersistError::Deserialization {
                        key: self.key.clone(),
                        source,
                    });
                }
            },
            Ok(None) => {
                log::debug!("No stored value for {}, using default", self.key);
            }
            Err(source) => {
                self.hydration = Hydration::Fallback;
                self.recover(PersistError::Persistence {
                    key: self.key.clone(),
                    op: StoreOp::Read,
                    source,
                });
            }
        }
    }

    /// Owned copy of the current value
    pub fn value(&self) -> T {
        self.value.clone()
    }

    /// Replace the value and queue a write
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.schedule_write();
    }

    /// Replace the value with a function of the previous one and queue a write
    pub fn update<F: FnOnce(&T) -> T>(&mut self, f: F) {
        let next = f(&self.value);
        self.set(next);
    }

    pub fn apply(&mut self, update: Update<T>) {
        match update {
            Update::Replace(value) => self.set(value),
            Update::With(f) => self.update(f),
        }
    }

    /// Restore the default and remove the slot.
    ///
    /// Queued writes are discarded so none of them lands after the removal.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            log::debug!("Reset {} dropped {} queued write(s)", self.key, dropped);
        }
        if let Err(source) = self.store.remove(&self.key) {
            self.recover(PersistError::Persistence {
                key: self.key.clone(),
                op: StoreOp::Remove,
                source,
            });
        }
    }

    fn schedule_write(&mut self) {
        match serde_json::to_string(&self.value) {
            Ok(raw) => self.pending.push_back(raw),
            Err(source) => self.recover(PersistError::Persistence {
                key: self.key.clone(),
                op: StoreOp::Write,
                source: StoreError::Encode(source),
            }),
        }
    }
}

impl<T> Drop for Persisted<T> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("pending", &self.pending.len())
            .field("hydration", &self.hydration)
            .finish()
    }
}
