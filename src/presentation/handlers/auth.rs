use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{MediaConverter, TranscriptionClient};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Exchanges the shared access password for a bearer token.
#[tracing::instrument(skip(state, request))]
pub async fn login_handler<C, T>(
    State(state): State<AppState<C, T>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionClient + 'static,
{
    if request.password != state.settings.auth.access_password {
        tracing::warn!("Login attempt with wrong password");
        return (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                token: None,
                error: Some("Invalid password".to_string()),
            }),
        );
    }

    state.token_store.prune().await;
    let token = state.token_store.issue().await;
    tracing::info!("Login succeeded, token issued");

    (
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            token: Some(token),
            error: None,
        }),
    )
}

#[derive(Serialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
}

/// Reached only through the auth middleware, so reaching it at all means the
/// token was valid.
pub async fn auth_check_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(AuthCheckResponse {
            authenticated: true,
        }),
    )
}
