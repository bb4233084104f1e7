//! Persistent key-value storage for cached credentials.
//!
//! DESIGN
//! ======
//! The auth client never reaches for ambient global storage. A backend is
//! chosen when the client is constructed:
//!
//! - [`MemoryStore`]: process-local map, used by tests and embedders.
//! - [`NoStorage`]: no persistent facility at all. Reads are absent and
//!   writes are dropped, so the client always reports unauthenticated.
//! - [`FileStore`]: JSON object on disk, used by the CLI.
//! - `LocalStorage` (`browser` feature): `window.localStorage`.
//!
//! Keys are fixed by the login flow that writes them: see [`TOKEN_KEY`] and
//! [`USER_KEY`].

mod file;
mod memory;

#[cfg(feature = "browser")]
mod browser;

#[cfg(feature = "browser")]
pub use browser::LocalStorage;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is not a JSON object: {message}")]
    Corrupt { path: String, message: String },

    #[error("store encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Capability to read and write string values by key.
///
/// `get` is infallible from the caller's point of view: a backend that cannot
/// read treats the key as absent and reports the reason through `tracing`.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the removal.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Backend for environments with no persistent storage facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl CredentialStore for NoStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        tracing::debug!(key, "no storage backend; write dropped");
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
