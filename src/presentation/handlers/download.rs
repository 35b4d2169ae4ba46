use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use super::ErrorResponse;
use crate::application::ports::{MediaConverter, TranscriptionClient};
use crate::infrastructure::storage::MediaLibraryError;
use crate::presentation::state::AppState;

/// Serves a file from the working directory as an attachment.
#[tracing::instrument(skip(state))]
pub async fn download_handler<C, T>(
    State(state): State<AppState<C, T>>,
    Path(filename): Path<String>,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionClient + 'static,
{
    match state.library.read(&filename).await {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{}\"", filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(MediaLibraryError::AccessDenied(_)) => {
            tracing::warn!("Rejected download escaping the working directory");
            (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Access denied")),
            )
                .into_response()
        }
        Err(MediaLibraryError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("File not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file for download");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read file")),
            )
                .into_response()
        }
    }
}
