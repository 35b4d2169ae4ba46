use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::{pipeline_error_status, ErrorResponse};
use crate::application::ports::{MediaConverter, TracingProgressSink, TranscriptionClient};
use crate::domain::{MediaKind, SourceMedia};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub success: bool,
    pub message: String,
    pub transcription: String,
    pub original_file: String,
    pub transcription_file: String,
}

/// Accepts a media upload, runs the transcription pipeline on it, and
/// returns the final transcript. The upload stays in the working directory;
/// only derived artifacts are cleaned up by the pipeline.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<C, T>(
    State(state): State<AppState<C, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: MediaConverter + 'static,
    T: TranscriptionClient + 'static,
{
    let mut field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Transcribe request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No file uploaded")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Failed to read multipart: {}", e))),
            )
                .into_response();
        }
    };

    let original_filename = field.file_name().unwrap_or("unknown").to_string();
    let content_type = field.content_type().unwrap_or("application/octet-stream");

    tracing::debug!(
        filename = %original_filename,
        content_type = %content_type,
        "Processing media upload"
    );

    let kind = match MediaKind::from_mime(content_type)
        .or_else(|| MediaKind::from_filename(&original_filename))
    {
        Some(k) => k,
        None => {
            tracing::warn!(content_type = %content_type, "Unsupported media type");
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse::new(
                    "Invalid file type. Please upload video or audio files only.",
                )),
            )
                .into_response();
        }
    };

    // Collision-avoiding stored name; drop any path the client sent along.
    let safe_name = Path::new(&original_filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let stored_name = format!("video_{}_{}", Utc::now().timestamp_millis(), safe_name);

    let (mut file, stored_path) = match state.library.create_file(&stored_name).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create upload file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to store upload")),
            )
                .into_response();
        }
    };

    let mut size_bytes: u64 = 0;
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                size_bytes += chunk.len() as u64;
                if let Err(e) = file.write_all(&chunk).await {
                    tracing::error!(error = %e, "Failed to write upload chunk");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse::new("Failed to store upload")),
                    )
                        .into_response();
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read upload body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("Failed to read file: {}", e))),
                )
                    .into_response();
            }
        }
    }
    if let Err(e) = file.flush().await {
        tracing::error!(error = %e, "Failed to flush upload");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to store upload")),
        )
            .into_response();
    }
    drop(file);

    tracing::info!(
        stored = %stored_name,
        size_bytes,
        kind = ?kind,
        "Upload received, starting transcription"
    );

    let source = SourceMedia::new(stored_path, kind, size_bytes);
    let result = state
        .pipeline
        .run_job(source, &original_filename, &TracingProgressSink)
        .await;

    match result {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                success: true,
                message: "Transcription completed".to_string(),
                transcription: outcome.transcript,
                original_file: stored_name,
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
