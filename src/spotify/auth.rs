use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::ExchangeError,
    info,
    management::TokenStore,
    types::TokenPayload,
};

/// Builds the URL that starts the authorization-code flow.
///
/// The user's browser is sent here, either directly at startup or through the
/// local `/login` route. Spotify redirects back to the configured redirect URI
/// with a one-time `code` once the user has granted access.
///
/// Query parameters are percent-encoded, so a space separated scope list
/// arrives intact.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config) -> String {
    let mut url = config.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("scope", &config.scope);
    url.to_string()
}

/// `Authorization` header value for client authentication at the token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Exchanges authorization codes for access tokens.
///
/// Holds the client credentials and the token endpoint. A single instance is
/// shared with the callback listener for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    client: Client,
    token_url: reqwest::Url,
    authorization: String,
    redirect_uri: String,
}

impl TokenExchanger {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            authorization: basic_auth_header(&config.client_id, &config.client_secret),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Sends a form-encoded `authorization_code` grant to the token endpoint,
    /// authenticated with the client id and secret.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Transport`] if the endpoint cannot be reached
    /// - [`ExchangeError::Status`] for any non-2xx answer, with the response body
    /// - [`ExchangeError::MalformedResponse`] if the body is not JSON
    /// - [`ExchangeError::MissingAccessToken`] if a 2xx body lacks `access_token`
    ///
    /// Metadata fields of an unexpected type do not fail the exchange; see
    /// [`TokenPayload::from_json`].
    ///
    /// Nothing in here panics, so a failed exchange can never take the
    /// listener down with it.
    pub async fn exchange(&self, code: &str) -> Result<TokenPayload, ExchangeError> {
        let res = self
            .client
            .post(self.token_url.clone())
            .header(AUTHORIZATION, &self.authorization)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::Status { status, body });
        }

        let json: Value = serde_json::from_str(&body)?;
        TokenPayload::from_json(&json, Utc::now()).ok_or(ExchangeError::MissingAccessToken)
    }
}

/// How the session loop waits for the token.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    pub interval: Duration,
    /// `None` waits forever.
    pub max_wait: Option<Duration>,
}

impl PollOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            max_wait: config.max_wait,
        }
    }
}

/// Waits until the token store holds a token.
///
/// Checks the store, prints a notice and sleeps for `options.interval`, over
/// and over. The store is re-read after every sleep, so a token written by the
/// listener in the meantime is picked up by the next check.
///
/// # Returns
///
/// - `Some(token)` as soon as the store is ready
/// - `None` once `options.max_wait` has elapsed or `cancel` fires
///
/// With no `max_wait` and a token that is never cancelled this polls forever,
/// which is what happens when the user abandons the browser flow.
pub async fn wait_for_token(
    store: &TokenStore,
    options: PollOptions,
    cancel: &CancellationToken,
) -> Option<String> {
    let deadline = options.max_wait.map(|max| Instant::now() + max);

    loop {
        if let Some(token) = store.get() {
            return Some(token);
        }

        if deadline.is_some_and(|d| Instant::now() >= d) || cancel.is_cancelled() {
            return None;
        }

        info!("You need to login! Waiting for authentication... (Please check your browser)");

        let nap = match deadline {
            Some(d) => options.interval.min(d.saturating_duration_since(Instant::now())),
            None => options.interval,
        };

        tokio::select! {
            _ = sleep(nap) => {}
            _ = cancel.cancelled() => {}
        }
    }
}
