//! Request and reply shapes of the storefront backend.
//!
//! Every backend reply wraps its payload in an [`Envelope`]; the types in
//! this module describe the `result` field of each endpoint.

pub mod cart;
pub mod user;

use serde::{Deserialize, Serialize};

pub use cart::CartItem;
pub use user::{LoginForm, LoginResult, Profile};

/// Reply envelope: `{ "success": bool, "message": string, "result": T }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub result: T,
}
