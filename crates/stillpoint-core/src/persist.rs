//! Typed persistence over a flat string key-value store.
//!
//! Each persisted type names its key and schema version. Values are written
//! whole as `{"version": n, "data": ...}`. Loading never fails: a missing,
//! corrupt or unmigratable value yields the type's default.

use fnv::FnvHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage backend rejected {key}: {reason}")]
    Backend { key: String, reason: String },
}

/// String key-value backend (browser local storage, or memory in tests).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: FnvHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

pub trait Persisted: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;
    const VERSION: u32;

    /// Convert data written by an older schema. `None` falls back to default.
    fn migrate(from_version: u32, data: serde_json::Value) -> Option<Self> {
        _ = (from_version, data);
        None
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u32,
    data: serde_json::Value,
}

pub fn load<T: Persisted, S: KeyValueStore + ?Sized>(store: &S) -> T {
    let Some(raw) = store.get(T::KEY) else {
        return T::default();
    };
    let env: RawEnvelope = match serde_json::from_str(&raw) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("[store] {} is corrupt, using defaults: {}", T::KEY, e);
            return T::default();
        }
    };
    if env.version == T::VERSION {
        return match serde_json::from_value(env.data) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[store] {} has bad data, using defaults: {}", T::KEY, e);
                T::default()
            }
        };
    }
    if env.version < T::VERSION {
        if let Some(v) = T::migrate(env.version, env.data) {
            log::info!(
                "[store] migrated {} v{} -> v{}",
                T::KEY,
                env.version,
                T::VERSION
            );
            return v;
        }
    }
    log::warn!(
        "[store] {} has unsupported version {} (want {}), using defaults",
        T::KEY,
        env.version,
        T::VERSION
    );
    T::default()
}

pub fn save<T: Persisted, S: KeyValueStore + ?Sized>(store: &mut S, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(&EnvelopeRef {
        version: T::VERSION,
        data: value,
    })
    .map_err(|source| StoreError::Serialize {
        key: T::KEY,
        source,
    })?;
    store.set(T::KEY, &raw)
}

pub fn clear<T: Persisted, S: KeyValueStore + ?Sized>(store: &mut S) {
    store.remove(T::KEY);
}
