//! In-memory store with fault injection

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// `HashMap`-backed store.
///
/// The `fail_*` switches and the optional byte quota simulate an unhealthy
/// browser store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    fail_removes: Cell<bool>,
    quota: Cell<Option<usize>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail with `Unavailable`
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every write fail with `Unavailable`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make every remove fail with `Unavailable`
    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.set(fail);
    }

    /// Limit total stored bytes (keys + values). `None` is unlimited.
    pub fn set_quota(&self, quota: Option<usize>) {
        self.quota.set(quota);
    }

    /// Store a raw string, bypassing quota and failure switches
    pub fn raw_set(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Raw stored string for a key
    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        if let Some(limit) = self.quota.get() {
            if self.used_bytes_without(key) + key.len() + value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        if self.fail_removes.get() {
            return Err(StoreError::Unavailable("removes disabled".to_string()));
        }
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
