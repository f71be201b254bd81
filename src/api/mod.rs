//! # API Module
//!
//! HTTP endpoints served by the local callback listener during login.
//!
//! ## Endpoints
//!
//! - [`login`] - `GET /login`, redirects the browser to Spotify's authorization
//!   page. Visiting it again restarts a failed login.
//! - [`callback`] - `GET /callback`, receives the one-time authorization code,
//!   exchanges it for an access token and publishes the token to the
//!   [`TokenStore`]. Failures are answered in plain text and never reach the
//!   server loop.
//! - [`health`] - `GET /health`, reports version and whether a token is held.
//!
//! All handlers share an [`AppState`] injected through an axum `Extension`.
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spotlog::api::{callback, health, login};
//!
//! let app = Router::new()
//!     .route("/login", get(login))
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .layer(Extension(state));
//! ```

use std::sync::Arc;

use crate::{
    config::Config,
    management::TokenStore,
    spotify::auth::{TokenExchanger, authorize_url},
};

mod callback;
mod health;
mod login;

pub use callback::{CallbackOutcome, LOGIN_SUCCESS, callback, handle_callback};
pub use health::health;
pub use login::login;

/// State shared by the listener's handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: TokenStore,
    pub exchanger: Arc<TokenExchanger>,
    pub authorize_url: String,
}

impl AppState {
    pub fn new(store: TokenStore, exchanger: TokenExchanger, authorize_url: String) -> Self {
        Self {
            store,
            exchanger: Arc::new(exchanger),
            authorize_url,
        }
    }

    pub fn from_config(config: &Config, store: TokenStore) -> Self {
        Self::new(store, TokenExchanger::new(config), authorize_url(config))
    }
}
