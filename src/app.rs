//! Application state container
//!
//! Everything demos share lives in one explicitly constructed
//! `AppContext`, created by `init` at startup and closed by `teardown`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::DEFAULT_NAMESPACE;
use crate::persisted::Persisted;
use crate::settings::Settings;
use crate::storage::StoreHandle;

/// Startup options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Prefix for every slot key
    pub namespace: String,
    /// Fixed RNG seed (tokens); `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            seed: None,
        }
    }
}

/// Shared state handed to every demo
pub struct AppContext {
    store: StoreHandle,
    namespace: String,
    settings: Persisted<Settings>,
    rng: Pcg32,
}

impl AppContext {
    pub fn init(store: StoreHandle, options: AppOptions) -> Self {
        let seed = options.seed.unwrap_or_else(rand::random);
        let settings_key = slot_key(&options.namespace, Settings::SLOT);
        let settings = Settings::load(store.clone(), settings_key);
        log::info!(
            "App context ready (store: {}, namespace: {})",
            store.name(),
            options.namespace
        );
        Self {
            store,
            namespace: options.namespace,
            settings,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn store(&self) -> StoreHandle {
        self.store.clone()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Namespaced key for a slot name
    pub fn slot_key(&self, name: &str) -> String {
        slot_key(&self.namespace, name)
    }

    /// Create a persisted value in this context's namespace
    pub fn persisted<T>(&self, name: &str, default: T) -> Persisted<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Clone,
    {
        Persisted::create(self.store.clone(), self.slot_key(name), default)
    }

    pub fn settings(&self) -> &Settings {
        self.settings.get()
    }

    pub fn settings_mut(&mut self) -> &mut Persisted<Settings> {
        &mut self.settings
    }

    /// Random lowercase hex string encoding `bytes` random bytes
    pub fn random_hex(&mut self, bytes: usize) -> String {
        (0..bytes)
            .map(|_| format!("{:02x}", self.rng.random::<u8>()))
            .collect()
    }

    /// Flush outstanding writes owned by the context
    pub fn teardown(&mut self) {
        let writes = self.settings.flush();
        log::info!("App context closed ({} settings write(s) flushed)", writes);
    }
}

fn slot_key(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", namespace, name)
    }
}
