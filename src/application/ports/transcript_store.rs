use async_trait::async_trait;

/// Persistence seam for finished transcripts. Names are resolved inside the
/// shared working directory; anything escaping it is rejected.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    async fn save_transcript(&self, name: &str, content: &str)
        -> Result<(), TranscriptStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptStoreError {
    #[error("transcript write failed: {0}")]
    WriteFailed(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
}
