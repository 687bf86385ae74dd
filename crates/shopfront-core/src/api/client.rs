//! API client for the storefront backend.
//!
//! `ApiClient` is the plain client: requests go out exactly as built. Calling
//! `authenticated` with the session yields the authenticated client, which
//! stamps `Authorization: Bearer <token>` on every request and recovers from
//! an expired token with one silent extend-and-retry.

use serde::Serialize;
use tracing::{debug, info};

use super::refresh::{send_with_refresh, TokenChange};
use super::transport::{HttpTransport, Transport};
use super::{endpoints, ApiError, ApiRequest, ApiResponse};
use crate::auth::Session;

#[derive(Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send without credential injection. Non-2xx statuses become errors.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.send(request).await?.into_result()
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Authenticated client bound to `session` for the duration of the borrow
    pub fn authenticated<'a>(&'a self, session: &'a mut Session) -> Authenticated<'a, T> {
        Authenticated {
            api: self,
            session,
            revoked: false,
        }
    }

    /// Exchange `token` for a fresh one. Sent with the bearer attached, as the
    /// authenticated client would; a 401 here is final.
    async fn extend(&self, token: &str) -> Result<String, ApiError> {
        let request = ApiRequest::post(endpoints::EXTEND)
            .json(&serde_json::json!({}))?
            .with_bearer(token)?;
        let renewed: String = self.send(request).await?.result()?;
        if renewed.is_empty() {
            return Err(ApiError::InvalidResponse("Extend returned an empty token".to_string()));
        }
        Ok(renewed)
    }
}

/// Authenticated view of an `ApiClient`.
///
/// Holds the session mutably so a refresh can swap the token before the
/// caller sees the result. When the refresh fails the session keeps the
/// rejected token and `is_revoked` turns true; the owner of the session is
/// expected to sign out, which still needs that token.
pub struct Authenticated<'a, T> {
    api: &'a ApiClient<T>,
    session: &'a mut Session,
    revoked: bool,
}

impl<'a, T: Transport> Authenticated<'a, T> {
    pub async fn send(&mut self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let api = self.api;
        let token = self.session.token().to_string();
        let request = request.with_bearer(&token)?;

        let outcome = send_with_refresh(request, |r| api.send(r), || api.extend(&token)).await;

        match outcome.token {
            TokenChange::Unchanged => {}
            TokenChange::Renewed(renewed) => {
                debug!("Session extended");
                self.session.renew_token(renewed);
            }
            TokenChange::Revoked => {
                info!("Session could not be extended");
                self.revoked = true;
            }
        }
        outcome.result
    }

    /// Whether a refresh has failed on this handle
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    pub async fn get(&mut self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&mut self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&mut self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete(&mut self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }
}
