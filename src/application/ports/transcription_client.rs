use std::path::Path;

use async_trait::async_trait;

/// Remote speech-to-text seam. One call per segment, no cross-segment
/// context, no retries; retry policy belongs to callers (and this system
/// performs none).
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Checked before a job does any work; a misconfigured client must fail
    /// here so no media processing happens for a job that cannot finish.
    fn ensure_configured(&self) -> Result<(), TranscriptionClientError> {
        Ok(())
    }

    async fn transcribe(&self, segment: &Path) -> Result<String, TranscriptionClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionClientError {
    /// The remote-service secret is absent; raised before any I/O.
    #[error("transcription service is not configured: {0}")]
    Configuration(String),
    /// Segment exceeds the remote per-call ceiling; raised before any
    /// network call.
    #[error("segment is {size_bytes} bytes, exceeds the {ceiling_bytes} byte service limit")]
    PayloadTooLarge { size_bytes: u64, ceiling_bytes: u64 },
    #[error("transcription service returned {status}: {body}")]
    Service { status: u16, body: String },
    #[error("transcription request timed out after {0}s")]
    Timeout(u64),
    #[error("segment could not be read: {0}")]
    Io(#[from] std::io::Error),
}
