//! Session record and token persistence.
//!
//! This module provides:
//! - `Session`: the signed-in user's token, account, role and cart count
//! - `TokenStore`: durable storage for the token, on disk or in the OS keychain
//!
//! Only the token survives a restart; the profile is fetched again.

pub mod session;
pub mod storage;

pub use session::Session;
pub use storage::{FileTokenStore, KeyringTokenStore, TokenStore, STORAGE_KEY};
