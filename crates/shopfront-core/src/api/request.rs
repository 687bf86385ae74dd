//! Transport-neutral request and response values.
//!
//! An `ApiRequest` is cheap to clone so the refresh decorator can keep a copy
//! of the original request and re-issue it with a new credential.

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use super::ApiError;
use crate::models::Envelope;

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Set (or replace) the `Authorization: Bearer` header
    pub fn with_bearer(mut self, token: &str) -> Result<Self, ApiError> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(self)
    }

    /// Current Authorization header, if any
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Turn a non-2xx status into the matching error
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response body: {}", e)))
    }

    /// Unwrap the `result` field of the backend's reply envelope
    pub fn result<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        self.json::<Envelope<T>>().map(|envelope| envelope.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_bearer_replaces_header() {
        let request = ApiRequest::get("/users")
            .with_bearer("first")
            .and_then(|r| r.with_bearer("second"))
            .expect("valid header values");
        assert_eq!(request.authorization(), Some("Bearer second"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_with_bearer_rejects_control_characters() {
        let result = ApiRequest::get("/users").with_bearer("bad\ntoken");
        assert!(matches!(result, Err(ApiError::InvalidHeader(_))));
    }

    #[test]
    fn test_result_unwraps_envelope() {
        let response = ApiResponse::new(StatusCode::OK, r#"{"success":true,"message":"","result":7}"#);
        let count: i64 = response.result().expect("envelope parses");
        assert_eq!(count, 7);

        let response = ApiResponse::new(StatusCode::OK, "not json");
        assert!(matches!(response.result::<i64>(), Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_into_result_keeps_success() {
        assert!(ApiResponse::new(StatusCode::CREATED, "").into_result().is_ok());
        let err = ApiResponse::new(StatusCode::UNAUTHORIZED, "")
            .into_result()
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
