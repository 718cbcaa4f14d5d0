use stillpoint_core::{KeyValueStore, StoreError};
use web_sys as web;

/// `window.localStorage` behind the core store trait.
pub struct LocalStore {
    storage: web::Storage,
}

impl LocalStore {
    /// `None` when storage is disabled (private mode, sandboxed iframe).
    pub fn open() -> Option<Self> {
        let window = web::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => {
                log::warn!("[store] localStorage not available");
                None
            }
            Err(e) => {
                log::warn!("[store] localStorage blocked: {:?}", e);
                None
            }
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Backend {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            log::warn!("[store] remove {} failed: {:?}", key, e);
        }
    }
}
