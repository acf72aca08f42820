//! API errors

use petgo::pricing::PricingError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session is missing or expired (HTTP 401).
    #[error("not logged in")]
    Unauthorized,

    /// The cart item or product does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned another non-2xx status.
    #[error("unexpected response ({status}): {message}")]
    UnexpectedResponse {
        /// HTTP status code
        status: u16,

        /// `message` or `error` from the body, or a status line
        message: String,
    },

    /// The response carried an amount that is not a valid price.
    #[error("invalid amount in response: {0}")]
    Pricing(#[from] PricingError),
}

impl ApiError {
    /// Map a non-success status and its body to an error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::UnexpectedResponse {
                status: status.as_u16(),
                message: error_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            },
        }
    }

    /// Check if the error means "not logged in".
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    parsed
        .message
        .or(parsed.error)
        .filter(|message| !message.trim().is_empty())
}
