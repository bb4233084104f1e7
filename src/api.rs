//! Sparks API calls layered on the authenticated request wrapper.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx status becomes an [`AuthError`]. A 401 from any call
//! clears cached credentials before returning [`AuthError::SessionExpired`].
//! Only [`AuthClient::update_user_strategy`] writes back to the cache; read
//! calls leave it untouched.

use reqwest::Method;
use serde_json::Value;

use crate::client::AuthClient;
use crate::error::AuthError;
use crate::store::USER_KEY;
use crate::transport::{ApiResponse, RequestOptions};
use crate::types::{NewSpark, SparksSmokeReport, StrategyUpdate, User};

pub const USERS_ME_PATH: &str = "/api/users/me";
pub const SPARKS_PATH: &str = "/api/sparks";

impl AuthClient {
    /// Join `path` onto the configured base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.config().url(path)
    }

    /// Check that the current token is accepted by `GET /api/users/me`.
    ///
    /// # Errors
    ///
    /// [`AuthError::SessionExpired`] on 401, [`AuthError::Status`] otherwise.
    pub async fn test_protected_endpoint(&self) -> Result<User, AuthError> {
        let response = self
            .authenticated_fetch(&self.url(USERS_ME_PATH), RequestOptions::default())
            .await?;
        self.ensure_success(&response, "fetch user data")?;
        response.json()
    }

    /// Fetch the signed-in user's profile. Does not refresh the cache.
    ///
    /// # Errors
    ///
    /// [`AuthError::SessionExpired`] on 401, [`AuthError::Status`] otherwise.
    pub async fn get_user_profile(&self) -> Result<User, AuthError> {
        let response = self
            .authenticated_fetch(&self.url(USERS_ME_PATH), RequestOptions::default())
            .await?;
        self.ensure_success(&response, "fetch user profile")?;
        response.json()
    }

    /// Set the user's strategy and cache the server's acknowledged record.
    ///
    /// The record is written to the `user` slot exactly as the server sent
    /// it, including fields [`User`] does not model.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidStrategy`] on 400, [`AuthError::UserNotFound`] on
    /// 404, [`AuthError::SessionExpired`] on 401, [`AuthError::Status`] for
    /// anything else. Failing to persist the record is [`AuthError::Storage`].
    pub async fn update_user_strategy(&self, strategy: &str) -> Result<User, AuthError> {
        let body = StrategyUpdate { strategy: strategy.to_owned() };
        let options = RequestOptions::new(Method::PUT).with_json(&body)?;
        let response = self.authenticated_fetch(&self.url(USERS_ME_PATH), options).await?;

        if !response.is_success() {
            return Err(match response.status {
                400 => AuthError::InvalidStrategy,
                404 => AuthError::UserNotFound,
                status => self.reject(status, "update strategy"),
            });
        }

        let user: User = response.json()?;
        self.store().set(USER_KEY, &response.body)?;
        tracing::info!(user_id = %user.id, "cached updated user record");

        Ok(user)
    }

    /// `GET /api/sparks`.
    ///
    /// # Errors
    ///
    /// [`AuthError::SessionExpired`] on 401, [`AuthError::Status`] otherwise.
    pub async fn list_sparks(&self) -> Result<Vec<Value>, AuthError> {
        let response = self
            .authenticated_fetch(&self.url(SPARKS_PATH), RequestOptions::default())
            .await?;
        self.ensure_success(&response, "get sparks")?;
        response.json()
    }

    /// `POST /api/sparks`.
    ///
    /// # Errors
    ///
    /// [`AuthError::SessionExpired`] on 401, [`AuthError::Status`] otherwise.
    pub async fn create_spark(&self, spark: &NewSpark) -> Result<Value, AuthError> {
        let options = RequestOptions::new(Method::POST).with_json(spark)?;
        let response = self.authenticated_fetch(&self.url(SPARKS_PATH), options).await?;
        self.ensure_success(&response, "create spark")?;
        response.json()
    }

    /// List sparks, then create the fixed test spark. The create request is
    /// only sent once the list has succeeded.
    ///
    /// # Errors
    ///
    /// The first failure of either call.
    pub async fn test_sparks_endpoints(&self) -> Result<SparksSmokeReport, AuthError> {
        let get_sparks = self.list_sparks().await?;
        let create_spark = self.create_spark(&NewSpark::smoke_test()).await?;
        Ok(SparksSmokeReport { get_sparks, create_spark })
    }

    fn ensure_success(&self, response: &ApiResponse, action: &'static str) -> Result<(), AuthError> {
        if response.is_success() {
            Ok(())
        } else {
            Err(self.reject(response.status, action))
        }
    }

    /// Map a failed status; a 401 invalidates the cached session.
    fn reject(&self, status: u16, action: &'static str) -> AuthError {
        if status == 401 {
            tracing::warn!(action, "session expired; clearing cached credentials");
            self.clear_auth();
            return AuthError::SessionExpired;
        }
        tracing::debug!(action, status, "request rejected");
        AuthError::Status { action, status }
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
