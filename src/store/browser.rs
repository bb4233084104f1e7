//! `window.localStorage` backend. Requires a browser environment.
//!
//! Looks the storage object up on every call, the same way the page code
//! does, so the struct itself holds no JS handles and stays `Send + Sync`.
//! Outside a window (workers, SSR) it behaves like [`super::NoStorage`].

use super::{CredentialStore, StoreError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(error = ?err, "localStorage lookup failed");
                None
            }
        }
    }
}

impl CredentialStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = ?err, key, "localStorage read failed");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let Some(storage) = Self::storage() else {
            return Ok(());
        };
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let Some(storage) = Self::storage() else {
            return Ok(());
        };
        storage
            .remove_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}
