use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Body of a failed response: the server's `message` field when the body is
/// a JSON object carrying one, plus the (truncated) raw text for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub raw: String,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message {
            Some(ref message) => f.write_str(message),
            None => f.write_str(&self.raw),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired ({0})")]
    Unauthorized(ErrorBody),

    #[error("Access denied: {0}")]
    AccessDenied(ErrorBody),

    #[error("Resource not found: {0}")]
    NotFound(ErrorBody),

    #[error("Server error: {0}")]
    ServerError(ErrorBody),

    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: ErrorBody },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(serde::Deserialize)]
struct MessageOnly {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    fn parse_body(body: &str) -> ErrorBody {
        let message = serde_json::from_str::<MessageOnly>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.is_empty());
        ErrorBody {
            message,
            raw: Self::truncate_body(body),
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = Self::parse_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(body),
            403 => ApiError::AccessDenied(body),
            404 => ApiError::NotFound(body),
            500..=599 => ApiError::ServerError(body),
            _ => ApiError::Rejected { status, body },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// The server's own explanation, when the failure came with a response
    /// body carrying a `message`.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(body)
            | ApiError::AccessDenied(body)
            | ApiError::NotFound(body)
            | ApiError::ServerError(body)
            | ApiError::Rejected { body, .. } => body.message.as_deref(),
            _ => None,
        }
    }
}
