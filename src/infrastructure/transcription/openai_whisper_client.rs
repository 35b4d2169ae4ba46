use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionClient, TranscriptionClientError};

/// Hard per-call payload limit of the Whisper API.
pub const REMOTE_PAYLOAD_CEILING_BYTES: u64 = 25 * 1024 * 1024;
/// Upper bound for one transcription round trip.
pub const REMOTE_TIMEOUT_SECS: u64 = 600;

/// `TranscriptionClient` backed by the OpenAI audio transcription endpoint.
pub struct OpenAiWhisperClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
}

impl OpenAiWhisperClient {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionClient for OpenAiWhisperClient {
    fn ensure_configured(&self) -> Result<(), TranscriptionClientError> {
        if self.api_key.is_empty() {
            return Err(TranscriptionClientError::Configuration(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }
        Ok(())
    }

    async fn transcribe(&self, segment: &Path) -> Result<String, TranscriptionClientError> {
        self.ensure_configured()?;

        let size_bytes = tokio::fs::metadata(segment).await?.len();
        if size_bytes > REMOTE_PAYLOAD_CEILING_BYTES {
            return Err(TranscriptionClientError::PayloadTooLarge {
                size_bytes,
                ceiling_bytes: REMOTE_PAYLOAD_CEILING_BYTES,
            });
        }

        let filename = segment
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());
        let data = tokio::fs::read(segment).await?;

        let file_part = multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str("audio/mpeg")
            .map_err(|e| TranscriptionClientError::Service {
                status: 0,
                body: format!("mime: {}", e),
            })?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", file_part);

        let url = format!("{}/audio/transcriptions", self.base_url);
        tracing::debug!(
            model = %self.model,
            segment = %segment.display(),
            size_bytes,
            "Sending audio segment to Whisper API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECS))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionClientError::Timeout(REMOTE_TIMEOUT_SECS)
                } else {
                    TranscriptionClientError::Service {
                        status: 0,
                        body: format!("request: {}", e),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionClientError::Service { status, body });
        }

        let parsed: WhisperResponse =
            response
                .json()
                .await
                .map_err(|e| TranscriptionClientError::Service {
                    status: 0,
                    body: format!("body: {}", e),
                })?;

        tracing::info!(
            segment = %segment.display(),
            chars = parsed.text.len(),
            "Whisper transcription completed"
        );

        Ok(parsed.text.trim().to_string())
    }
}
