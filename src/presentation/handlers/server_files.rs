use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use super::ErrorResponse;
use crate::application::ports::{MediaConverter, TranscriptionClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ServerFilesResponse {
    pub files: Vec<ServerFileEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerFileEntry {
    pub name: String,
    pub size: u64,
    pub modified: String,
    pub is_transcription: bool,
}

/// Lists media and transcript files in the working directory, newest first.
#[tracing::instrument(skip(state))]
pub async fn server_files_handler<C, T>(
    State(state): State<AppState<C, T>>,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionClient + 'static,
{
    match state.library.list().await {
        Ok(entries) => {
            let files = entries
                .into_iter()
                .map(|e| ServerFileEntry {
                    name: e.name,
                    size: e.size_bytes,
                    modified: e.modified.to_rfc3339(),
                    is_transcription: e.is_transcript,
                })
                .collect();
            (StatusCode::OK, Json(ServerFilesResponse { files })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list server files");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to list server files")),
            )
                .into_response()
        }
    }
}
