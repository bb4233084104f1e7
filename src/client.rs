//! `AuthClient`: credential state plus the authenticated request wrapper.
//!
//! DESIGN
//! ======
//! The client owns no state of its own beyond configuration. Every query
//! goes back to the injected [`CredentialStore`], and every request goes out
//! through the injected [`HttpTransport`]. The only reactive state change is
//! [`AuthClient::clear_auth`], run by domain calls on a 401.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};

use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::state::{AuthState, StoredCredentials};
use crate::store::{CredentialStore, TOKEN_KEY, USER_KEY};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, RequestOptions};

pub struct AuthClient {
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    transport: Arc<dyn HttpTransport>,
}

impl AuthClient {
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, store, transport }
    }

    /// Build a client that talks HTTP through reqwest.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_reqwest(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AuthError> {
        let transport = ReqwestTransport::new(config.timeouts)?;
        Ok(Self::new(config, store, Arc::new(transport)))
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    // =========================================================================
    // STATE
    // =========================================================================

    /// Read both credential keys, reporting a corrupt user value explicitly.
    #[must_use]
    pub fn stored_credentials(&self) -> StoredCredentials {
        StoredCredentials::load(self.store.as_ref())
    }

    /// Current authentication state. Never fails; a corrupt cached user is
    /// logged and reads as absent.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.stored_credentials().into_auth_state()
    }

    /// Remove the cached token and user. Idempotent.
    pub fn clear_auth(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(error) = self.store.remove(key) {
                tracing::warn!(%error, key, "failed to remove cached credential");
            }
        }
    }

    // =========================================================================
    // REQUESTS
    // =========================================================================

    /// Send a request to `url` carrying the cached bearer token.
    ///
    /// `Authorization` and `Content-Type: application/json` are forced over
    /// any caller header of the same name. The response is returned as-is;
    /// status codes are not interpreted here.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingToken`] without touching the network when
    /// no token is cached, or a transport error if no response arrived.
    pub async fn authenticated_fetch(&self, url: &str, options: RequestOptions) -> Result<ApiResponse, AuthError> {
        let Some(token) = self.auth_state().token else {
            return Err(AuthError::MissingToken);
        };

        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
        bearer.set_sensitive(true);

        let RequestOptions { method, mut headers, body } = options;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(%method, url, "authenticated request");
        self.transport
            .send(ApiRequest { method, url: url.to_owned(), headers, body })
            .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
