//! Demo settings and preferences
//!
//! Persisted in their own slot through [`Persisted`], next to the demo
//! slots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persisted::Persisted;
use crate::storage::StoreHandle;

/// Smallest and largest login token size in bytes
pub const TOKEN_BYTES_RANGE: std::ops::RangeInclusive<usize> = 8..=64;

/// Rejected settings change
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown setting: {0}")]
    UnknownField(String),

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Demo settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quiet period before the debounce demo settles (ms)
    pub debounce_ms: u64,
    /// Maximum items in the to-do list
    pub max_todos: usize,
    /// Dropdown menu entries
    pub menu_items: Vec<String>,
    /// Login token size in bytes (rendered as hex)
    pub token_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            max_todos: 50,
            menu_items: vec![
                "Profile".to_string(),
                "Settings".to_string(),
                "Sign out".to_string(),
            ],
            token_bytes: 16,
        }
    }
}

impl Settings {
    /// Slot name (before namespacing)
    pub const SLOT: &'static str = "settings";

    /// Names accepted by [`Settings::set_field`]
    pub const FIELDS: [&'static str; 4] = ["debounce_ms", "max_todos", "menu_items", "token_bytes"];

    /// Load settings from the store, falling back to defaults
    pub fn load(store: StoreHandle, key: impl Into<String>) -> Persisted<Settings> {
        let settings = Persisted::create(store, key, Settings::default());
        log::info!("Settings loaded ({:?})", settings.hydrated_from());
        settings
    }

    /// Token size clamped to the supported range
    pub fn effective_token_bytes(&self) -> usize {
        self.token_bytes
            .clamp(*TOKEN_BYTES_RANGE.start(), *TOKEN_BYTES_RANGE.end())
    }

    /// Apply a textual update. `menu_items` takes a comma separated list.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = |field: &'static str| SettingsError::InvalidValue {
            field,
            value: value.to_string(),
        };
        match field {
            "debounce_ms" => {
                self.debounce_ms = value.parse().map_err(|_| invalid("debounce_ms"))?;
            }
            "max_todos" => {
                self.max_todos = value.parse().map_err(|_| invalid("max_todos"))?;
            }
            "menu_items" => {
                let items: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if items.is_empty() {
                    return Err(invalid("menu_items"));
                }
                self.menu_items = items;
            }
            "token_bytes" => {
                let bytes: usize = value.parse().map_err(|_| invalid("token_bytes"))?;
                if !TOKEN_BYTES_RANGE.contains(&bytes) {
                    return Err(invalid("token_bytes"));
                }
                self.token_bytes = bytes;
            }
            other => return Err(SettingsError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// One `name = value` line per field
    pub fn describe(&self) -> String {
        format!(
            "debounce_ms = {}\nmax_todos = {}\nmenu_items = {}\ntoken_bytes = {}",
            self.debounce_ms,
            self.max_todos,
            self.menu_items.join(", "),
            self.token_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    #[test]
    fn test_set_field() {
        let mut settings = Settings::default();
        settings.set_field("debounce_ms", "500").unwrap();
        settings.set_field("menu_items", "Home, Help ,,").unwrap();
        assert_eq!(settings.debounce_ms, 500);
        assert_eq!(settings.menu_items, vec!["Home", "Help"]);
    }

    #[test]
    fn test_set_field_rejects_bad_input() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set_field("volume", "1"),
            Err(SettingsError::UnknownField("volume".to_string()))
        );
        assert!(settings.set_field("max_todos", "-1").is_err());
        assert!(settings.set_field("token_bytes", "4").is_err());
        assert!(settings.set_field("menu_items", " , ").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let settings: Settings = serde_json::from_str(r#"{"debounce_ms": 10, "extra": 1}"#).unwrap();
        assert_eq!(settings.debounce_ms, 10);
        assert_eq!(settings.max_todos, Settings::default().max_todos);
    }

    #[test]
    fn test_effective_token_bytes_clamps() {
        let settings = Settings {
            token_bytes: 1000,
            ..Default::default()
        };
        assert_eq!(settings.effective_token_bytes(), 64);
    }

    #[test]
    fn test_load_persists_changes() {
        let store: StoreHandle = Rc::new(MemoryStore::new());
        let mut settings = Settings::load(store.clone(), "ns:settings");
        settings.update(|prev| Settings {
            max_todos: 3,
            ..prev.clone()
        });
        settings.flush();
        let reloaded = Settings::load(store, "ns:settings");
        assert_eq!(reloaded.get().max_todos, 3);
    }
}
