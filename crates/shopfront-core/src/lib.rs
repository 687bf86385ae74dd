//! shopfront-core - Client-side session layer for the storefront backend.
//!
//! This crate contains the HTTP client (with bearer injection and one-shot
//! token refresh), the session record and its persistence, and the session
//! store that drives login, logout, cart and checkout. It has no terminal or
//! UI dependencies; front ends render [`feedback::Feedback`] however they
//! like.

pub mod api;
pub mod auth;
pub mod config;
pub mod feedback;
pub mod models;
pub mod store;

pub use api::{ApiClient, ApiError, Transport};
pub use auth::Session;
pub use config::Config;
pub use feedback::{Action, Feedback, Notice, NoticeLevel, Route};
pub use models::{CartItem, LoginForm};
pub use store::{ActionError, ActionResult, SessionStore};
