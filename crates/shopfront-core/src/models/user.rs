use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials for `POST /users/login`
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginForm {
    pub account: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs
impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `result` of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginResult {
    pub token: String,
    pub account: String,
    #[serde(default)]
    pub role: i32,
    #[serde(default)]
    pub cart: i64,
}

/// `result` of `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Profile {
    pub account: String,
    #[serde(default)]
    pub role: i32,
    #[serde(default)]
    pub cart: i64,
}
