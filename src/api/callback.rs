use std::collections::HashMap;

use axum::{Extension, extract::Query, http::StatusCode};

use crate::{api::AppState, success, warning};

pub const LOGIN_SUCCESS: &str =
    "Login successful! You can now close this window and return to the command line.";

/// Response produced by the callback handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    pub status: StatusCode,
    pub message: String,
}

impl CallbackOutcome {
    fn success() -> Self {
        Self {
            status: StatusCode::OK,
            message: LOGIN_SUCCESS.to_string(),
        }
    }

    fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Completes the login started by `/login` or the browser launch.
///
/// The token store is only written when the exchange succeeds. Every other
/// path answers with a failure message and leaves the store as it was, so the
/// session loop keeps waiting and the user can simply retry `/login`.
pub async fn handle_callback(
    state: &AppState,
    params: &HashMap<String, String>,
) -> CallbackOutcome {
    if let Some(error) = params.get("error") {
        warning!("Authorization was not granted: {}", error);
        return CallbackOutcome::failure(
            StatusCode::BAD_REQUEST,
            format!("Authorization failed: {}", error),
        );
    }

    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        return CallbackOutcome::failure(
            StatusCode::BAD_REQUEST,
            "Error obtaining token: missing authorization code",
        );
    };

    match state.exchanger.exchange(code).await {
        Ok(payload) => {
            tracing::debug!(
                token_type = ?payload.token_type,
                expires_in = ?payload.expires_in,
                scope = ?payload.scope,
                obtained_at = %payload.obtained_at,
                "authorization code exchanged"
            );
            state.store.set(payload.access_token);
            success!("Authentication successful!");
            CallbackOutcome::success()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            CallbackOutcome::failure(
                StatusCode::BAD_GATEWAY,
                format!("Error obtaining token: {}", e),
            )
        }
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> (StatusCode, String) {
    let outcome = handle_callback(&state, &params).await;
    (outcome.status, outcome.message)
}
