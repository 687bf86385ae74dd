#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use reqwest::StatusCode;
use serde_json::{json, Value};
use shopfront_core::api::{ApiError, ApiRequest, ApiResponse, Transport};
use shopfront_core::auth::FileTokenStore;
use shopfront_core::{ApiClient, SessionStore};

/// Transport that replays scripted replies in order and records every request
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body.to_string())));
        self
    }

    /// Envelope reply `{ success: true, message: "", result }`
    pub fn ok(self, result: Value) -> Self {
        self.reply(200, json!({ "success": true, "message": "", "result": result }))
    }

    pub fn unauthorized(self) -> Self {
        self.reply(401, json!({ "success": false, "message": "Login expired" }))
    }

    pub fn network_failure(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network("connection refused".into())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())))
    }
}

pub fn store(transport: FakeTransport, dir: &Path) -> SessionStore<FakeTransport> {
    SessionStore::new(ApiClient::new(transport), Box::new(FileTokenStore::new(dir)))
}

pub fn login_reply(token: &str, cart: i64) -> Value {
    json!({ "token": token, "account": "alice", "role": 0, "cart": cart })
}
