//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API spotlog needs: the
//! authorization-code flow and the listening history endpoints.
//!
//! ```text
//! Session loop / callback listener
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization URL, code exchange, token wait)
//!     └── History (recently played, top tracks, top artists)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] builds the authorization URL, performs the code-for-token exchange
//! with client credentials and waits for the token store to be populated.
//! Tokens are neither refreshed nor persisted; a new login is needed on every run.
//!
//! ## History
//!
//! [`history`] fetches a single page of 50 items per request. All calls take the
//! bearer token explicitly so they can be driven from any holder of the
//! [`TokenStore`](crate::management::TokenStore).

pub mod auth;
pub mod history;
