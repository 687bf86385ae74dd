//! The seam between the API client and the network.
//!
//! A transport returns every HTTP status as a response; only failures where
//! no response arrived at all (connection refused, timeout, TLS) are errors.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::{ApiError, ApiRequest, ApiResponse};

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// Production transport over a pooled `reqwest::Client`.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(url = %url, status = %status, "Response received");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = HttpTransport::new("http://localhost:4000/").expect("client builds");
        assert_eq!(transport.base_url(), "http://localhost:4000");
        assert_eq!(transport.url("/users/login"), "http://localhost:4000/users/login");
    }
}
