//! Test doubles shared by the unit test modules.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::Method;

use crate::client::AuthClient;
use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::store::{MemoryStore, TOKEN_KEY, USER_KEY};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

pub const BASE_URL: &str = "http://sparks.test";

pub const USER_JSON: &str =
    r#"{"id":"1","email":"a@b.c","name":"Ada","strategy":"old","createdAt":"2024-01-01T00:00:00Z"}"#;

/// Scripted reply for one request.
pub enum Reply {
    Respond(ApiResponse),
    Fail(String),
}

/// Transport that records every request and answers from a script.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn replying(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(replies.into_iter().collect()), requests: Mutex::default() })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.url))
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(AuthError::Transport(message)),
            None => Err(AuthError::Transport("no scripted reply".to_owned())),
        }
    }
}

pub fn ok(body: serde_json::Value) -> Reply {
    Reply::Respond(ApiResponse::new(200, body.to_string()))
}

pub fn status(code: u16) -> Reply {
    Reply::Respond(ApiResponse::new(code, r#"{"error":"nope"}"#))
}

/// Store holding a token and a valid user.
pub fn signed_in_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "tok-123"), (USER_KEY, USER_JSON)]))
}

pub fn client_with(store: Arc<MemoryStore>, transport: Arc<MockTransport>) -> AuthClient {
    let config = ClientConfig::with_base_url(BASE_URL).unwrap();
    AuthClient::new(config, store, transport)
}
