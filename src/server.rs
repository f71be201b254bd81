use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{Res, api};

pub fn router(state: api::AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
}

/// Binds the callback listener.
///
/// Done before anything is spawned so an occupied port is reported at startup
/// instead of leaving the session waiting for a callback that can never arrive.
pub async fn bind(addr: SocketAddr) -> Res<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    tracing::debug!(addr = %listener.local_addr()?, "callback listener bound");
    Ok(listener)
}

pub async fn start_api_server(listener: TcpListener, state: api::AppState) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Serves the listener on a detached task.
///
/// The task is never joined or cancelled; it lives until the process exits.
pub fn spawn_api_server(listener: TcpListener, state: api::AppState) {
    tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, state).await {
            crate::warning!("Callback listener stopped: {}", e);
        }
    });
}
