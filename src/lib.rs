//! # sparks-auth
//!
//! Client-side authentication helper for the Sparks API.
//!
//! Reads a bearer token and cached user record from a pluggable
//! [`CredentialStore`], derives [`AuthState`], and wraps outgoing requests
//! with `Authorization: Bearer <token>`. On top of the wrapper sit the
//! profile and sparks calls, which translate HTTP statuses into
//! [`AuthError`] and clear the cached session on a 401.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::AuthClient;
pub use config::{ClientConfig, ClientTimeouts};
pub use error::{AuthError, ErrorCode};
pub use state::{AuthState, CachedUser, StoredCredentials};
#[cfg(feature = "browser")]
pub use store::LocalStorage;
pub use store::{CredentialStore, FileStore, MemoryStore, NoStorage, StoreError};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, RequestOptions};
pub use types::{NewSpark, SparksSmokeReport, User};
