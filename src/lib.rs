//! Spotify listening history exporter
//!
//! This library logs a single local user in to the Spotify Web API through the
//! OAuth2 authorization-code flow, fetches listening history and rankings,
//! flattens them into records and forwards those records to a log intake
//! endpoint.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local login listener
//! - `cli` - Interactive session and command implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types
//! - `export` - Fetch, shape and forward behind the `Exporter` trait
//! - `ingest` - Log intake client
//! - `management` - In-process token store
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Record shaping and menu helpers
//!
//! # Example
//!
//! ```
//! use spotlog::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotlog::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::print_auth_url(&config);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias used by the application glue.
///
/// Component boundaries use the typed errors in [`error`]; everything that only
/// needs to bubble a failure up to `main` uses this boxed form, which stays
/// `Send + Sync` so it can cross task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Waiting for the login callback on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for failures that must stop the process before the listener or the
/// session loop is started, such as missing credentials.
///
/// ```
/// error!("Cannot load configuration. Err: {}", err);
/// // never reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem prefixed with a yellow `!`.
///
/// Used for failed exchanges, fetches and forwards; the session carries on.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
