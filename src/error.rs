//! Error types shared across the crate.
//!
//! Three families exist, one per failure domain:
//!
//! - [`ConfigError`] is fatal and only raised while loading configuration at startup.
//! - [`ExchangeError`] is raised by the token exchange and is always recovered by the
//!   callback handler, which turns it into a browser-facing failure page.
//! - [`TransportError`] covers the data fetch and forward calls made once a token is
//!   available. These are reported to the user and never end the session.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(var: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("token endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token endpoint answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("token endpoint sent a malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("token endpoint response has no access_token")]
    MissingAccessToken,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// Reads the body of a non-success response into a [`TransportError::Status`].
    pub(crate) async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        Self::Status { status, body }
    }
}
