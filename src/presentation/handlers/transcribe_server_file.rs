use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{pipeline_error_status, ErrorResponse};
use crate::application::ports::{MediaConverter, TracingProgressSink, TranscriptionClient};
use crate::domain::{MediaKind, SourceMedia};
use crate::infrastructure::storage::MediaLibraryError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ServerFileRequest {
    pub filename: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerFileTranscribeResponse {
    pub success: bool,
    pub message: String,
    pub transcription: String,
    pub transcription_file: String,
}

/// Transcribes a file already present in the working directory.
#[tracing::instrument(skip(state, request), fields(filename = %request.filename))]
pub async fn transcribe_server_file_handler<C, T>(
    State(state): State<AppState<C, T>>,
    Json(request): Json<ServerFileRequest>,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionClient + 'static,
{
    if request.filename.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No filename provided")),
        )
            .into_response();
    }

    let path = match state.library.resolve(&request.filename) {
        Ok(p) => p,
        Err(MediaLibraryError::AccessDenied(_)) => {
            tracing::warn!("Rejected path escaping the working directory");
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Access denied")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve server file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to resolve file")),
            )
                .into_response();
        }
    };

    let size_bytes = match state.library.size_of(&request.filename).await {
        Ok(size) => size,
        Err(MediaLibraryError::NotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("File not found")),
            )
                .into_response();
        }
        Err(MediaLibraryError::AccessDenied(_)) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Access denied")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to stat server file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read file metadata")),
            )
                .into_response();
        }
    };

    // Unknown extensions are treated as video so the converter gets a chance
    // to pull an audio track out of them.
    let kind = MediaKind::from_filename(&request.filename).unwrap_or(MediaKind::Video);

    tracing::info!(size_bytes, kind = ?kind, "Starting server-file transcription");

    let source = SourceMedia::new(path, kind, size_bytes);
    let result = state
        .pipeline
        .run_job(source, &request.filename, &TracingProgressSink)
        .await;

    match result {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ServerFileTranscribeResponse {
                success: true,
                message: "Transcription completed".to_string(),
                transcription: outcome.transcript,
                transcription_file: outcome.artifact_name,
            }),
        )
            .into_response(),
        Err(e) => (
            pipeline_error_status(&e),
            Json(ErrorResponse::with_details(
                "Transcription failed",
                e.to_string(),
            )),
        )
            .into_response(),
    }
}
