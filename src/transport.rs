//! HTTP transport seam.
//!
//! The auth client builds an [`ApiRequest`] and hands it to an
//! [`HttpTransport`]. Production code uses [`ReqwestTransport`]; tests swap
//! in a recording double. Responses are fully buffered into [`ApiResponse`]
//! so status interpretation happens in one place, after the body is read.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientTimeouts;
use crate::error::AuthError;

/// Caller-supplied request options for [`crate::AuthClient::authenticated_fetch`].
///
/// Defaults to a bodiless `GET` with no extra headers.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Encode`] if `value` cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, AuthError> {
        let body = serde_json::to_string(value).map_err(|e| AuthError::Encode(e.to_string()))?;
        Ok(self.with_body(body))
    }
}

/// Fully-formed outgoing request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Buffered response: status and body, both uninterpreted.
#[derive(Clone, Debug, Default)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, headers: HeaderMap::new(), body: body.into() }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AuthError> {
        serde_json::from_str(&self.body).map_err(|e| AuthError::Decode(e.to_string()))
    }
}

/// Sends one request and buffers the response.
///
/// No deadline is applied unless the transport was built with one.
/// Implementations must not interpret the status code: a 4xx or 5xx is still
/// `Ok(ApiResponse)`. `Err` is reserved for requests that got no response.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError>;
}

/// [`HttpTransport`] over a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the TLS backend fails to
    /// initialize.
    pub fn new(timeouts: ClientTimeouts) -> Result<Self, AuthError> {
        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(secs) = timeouts.request_secs {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = timeouts.connect_secs {
                builder = builder.connect_timeout(Duration::from_secs(secs));
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _timeouts = timeouts;
        let http = builder
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let ApiRequest { method, url, headers, body } = request;
        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, headers, body })
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
