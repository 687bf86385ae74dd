//! REST API client module for the storefront backend.
//!
//! This module provides the `ApiClient` for communicating with the backend,
//! the `Transport` seam it sends through, and the retry-once token refresh
//! used by the authenticated client.
//!
//! The API uses JWT bearer token authentication obtained from the login
//! endpoint and renewed through the extend endpoint.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod refresh;
pub mod request;
pub mod transport;

pub use client::{ApiClient, Authenticated};
pub use error::{ApiError, ErrorBody};
pub use refresh::{send_with_refresh, Refreshed, TokenChange};
pub use request::{ApiRequest, ApiResponse};
pub use transport::{HttpTransport, Transport};
