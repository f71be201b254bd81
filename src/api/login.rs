use axum::{Extension, response::Redirect};

use crate::api::AppState;

/// Sends the browser to the authorization server.
pub async fn login(Extension(state): Extension<AppState>) -> Redirect {
    Redirect::to(&state.authorize_url)
}
