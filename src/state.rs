//! Authentication state derived from the credential store.
//!
//! DESIGN
//! ======
//! Nothing here is cached. [`StoredCredentials::load`] reads both keys on
//! every call and reports a corrupt user value explicitly as
//! [`CachedUser::Corrupt`]. [`AuthState`] is the degraded view most callers
//! want, where corruption reads as "no user" after a warning is logged.

use crate::store::{CredentialStore, TOKEN_KEY, USER_KEY};
use crate::types::User;

/// Outcome of reading the `user` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedUser {
    Missing,
    Valid(User),
    /// Present but not a valid user record.
    Corrupt { raw: String, error: String },
}

impl CachedUser {
    fn parse(raw: Option<String>) -> Self {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return Self::Missing;
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Self::Valid(user),
            Err(e) => Self::Corrupt { raw, error: e.to_string() },
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Valid(user) => Some(user),
            Self::Missing | Self::Corrupt { .. } => None,
        }
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// Raw view of the store: token plus the explicit user parse outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub user: CachedUser,
}

impl StoredCredentials {
    /// Empty strings read as absent for both keys.
    pub fn load(store: &dyn CredentialStore) -> Self {
        Self {
            token: store.get(TOKEN_KEY).filter(|t| !t.is_empty()),
            user: CachedUser::parse(store.get(USER_KEY)),
        }
    }

    /// Degrade to [`AuthState`], logging a corrupt user value.
    #[must_use]
    pub fn into_auth_state(self) -> AuthState {
        let user = match self.user {
            CachedUser::Valid(user) => Some(user),
            CachedUser::Missing => None,
            CachedUser::Corrupt { error, .. } => {
                tracing::warn!(%error, "failed to parse cached user data");
                None
            }
        };
        AuthState::new(self.token, user)
    }
}

/// Snapshot of who is signed in.
///
/// `is_authenticated` holds iff both the token and a parsed user are present.
/// A token with no usable user is kept as-is (not authenticated) until the
/// next clear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthState {
    #[must_use]
    pub fn new(token: Option<String>, user: Option<User>) -> Self {
        let is_authenticated = token.is_some() && user.is_some();
        Self { token, user, is_authenticated }
    }

    /// The state reported when no credentials are available.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
