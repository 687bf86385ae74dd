//! Retry-once token refresh.
//!
//! `send_with_refresh` wraps a base send function. When the wrapped call
//! fails with 401 it asks the `refresh` callback for a new token, patches the
//! original request's Authorization header and re-issues it exactly once.
//! The extend and logout paths are never refreshed, which keeps a rejected
//! refresh from looping.

use std::future::Future;

use tracing::{debug, warn};

use super::{endpoints, ApiError, ApiRequest, ApiResponse};

/// What the refresh protocol did to the caller's credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenChange {
    /// No refresh was attempted
    Unchanged,
    /// Refresh succeeded; the session must adopt this token
    Renewed(String),
    /// Refresh failed; the session must be signed out
    Revoked,
}

#[derive(Debug)]
pub struct Refreshed {
    pub result: Result<ApiResponse, ApiError>,
    pub token: TokenChange,
}

/// Whether a 401 on this request may trigger a refresh.
pub fn is_refreshable(request: &ApiRequest) -> bool {
    request.path != endpoints::EXTEND && request.path != endpoints::LOGOUT
}

pub async fn send_with_refresh<S, SF, R, RF>(request: ApiRequest, send: S, refresh: R) -> Refreshed
where
    S: Fn(ApiRequest) -> SF,
    SF: Future<Output = Result<ApiResponse, ApiError>>,
    R: FnOnce() -> RF,
    RF: Future<Output = Result<String, ApiError>>,
{
    let original = request.clone();

    match send(request).await {
        Err(err) if err.is_unauthorized() && is_refreshable(&original) => {
            debug!(path = %original.path, "Got 401, extending session");
            match refresh().await {
                Ok(token) => match original.with_bearer(&token) {
                    Ok(retry) => Refreshed {
                        result: send(retry).await,
                        token: TokenChange::Renewed(token),
                    },
                    // A token that cannot be sent is as good as no token
                    Err(e) => {
                        warn!(error = %e, "Extended token is not a valid header, forcing logout");
                        Refreshed {
                            result: Err(e),
                            token: TokenChange::Revoked,
                        }
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Session extension failed, forcing logout");
                    Refreshed {
                        result: Err(e),
                        token: TokenChange::Revoked,
                    }
                }
            }
        }
        result => Refreshed {
            result,
            token: TokenChange::Unchanged,
        },
    }
}
