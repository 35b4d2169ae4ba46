use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use super::TokenStore;

#[derive(Serialize)]
struct AuthError {
    error: String,
}

/// Guards API routes: requires a valid `Authorization: Bearer <token>`
/// issued by the login endpoint.
pub async fn require_auth(
    State(store): State<Arc<TokenStore>>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(AuthError {
                    error: "No token provided".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !store.validate(token).await {
        return (
            StatusCode::FORBIDDEN,
            Json(AuthError {
                error: "Invalid token".to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}
