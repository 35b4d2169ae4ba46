use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{MediaConverter, TranscriptionClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::auth::require_auth;
use crate::presentation::handlers::{
    auth_check_handler, download_handler, health_handler, login_handler, server_files_handler,
    transcribe_handler, transcribe_server_file_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<C, T>(state: AppState<C, T>) -> Router
where
    C: MediaConverter + 'static,
    T: TranscriptionClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let token_store = Arc::clone(&state.token_store);
    let upload_limit = state.settings.storage.upload_ceiling_bytes as usize;
    let public_dir = state.settings.storage.public_dir.clone();

    let protected = Router::new()
        .route("/api/auth/check", get(auth_check_handler))
        .route("/api/server-files", get(server_files_handler::<C, T>))
        .route(
            "/api/transcribe",
            post(transcribe_handler::<C, T>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/transcribe-server-file",
            post(transcribe_server_file_handler::<C, T>),
        )
        .route("/api/download/{filename}", get(download_handler::<C, T>))
        .route_layer(middleware::from_fn_with_state(token_store, require_auth));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/login", post(login_handler::<C, T>))
        .merge(protected)
        .fallback_service(ServeDir::new(public_dir))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
