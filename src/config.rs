//! Client configuration parsed from environment variables.

use crate::error::AuthError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Optional transport deadlines. Both are unset unless configured; a request
/// otherwise waits for the server as long as it takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

impl ClientTimeouts {
    /// Read `SPARKS_REQUEST_TIMEOUT_SECS` and `SPARKS_CONNECT_TIMEOUT_SECS`.
    /// Unset or unparseable values leave the deadline off.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            request_secs: env_parse_u64("SPARKS_REQUEST_TIMEOUT_SECS"),
            connect_secs: env_parse_u64("SPARKS_CONNECT_TIMEOUT_SECS"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: ClientTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeouts: ClientTimeouts::default() }
    }
}

impl ClientConfig {
    /// Build a config for `base_url` with no timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the URL is empty.
    pub fn with_base_url(base_url: &str) -> Result<Self, AuthError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, ..Self::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SPARKS_BASE_URL`: default `http://localhost:3000`
    /// - `SPARKS_REQUEST_TIMEOUT_SECS`: no request deadline when absent
    /// - `SPARKS_CONNECT_TIMEOUT_SECS`: no connect deadline when absent
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if `SPARKS_BASE_URL` is set but empty.
    pub fn from_env() -> Result<Self, AuthError> {
        let raw = std::env::var("SPARKS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let base_url = normalize_base_url(&raw)?;
        Ok(Self { base_url, timeouts: ClientTimeouts::from_env() })
    }

    /// Join `path` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AuthError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::Config("base URL is empty".to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &str) -> Option<u64> {
    let Ok(raw) = std::env::var(key) else {
        return None;
    };
    if let Ok(secs) = raw.trim().parse::<u64>() { Some(secs) } else { None }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
