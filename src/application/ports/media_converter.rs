use std::path::Path;

use async_trait::async_trait;

/// External media tool seam: audio extraction, duration probing, and
/// time-bounded segment extraction. Every invocation must finish within a
/// finite timeout; the input file is never mutated.
#[async_trait]
pub trait MediaConverter: Send + Sync {
    /// Strips video and re-encodes to compact mono audio, writing `dest`.
    async fn extract_audio(&self, source: &Path, dest: &Path) -> Result<(), MediaConverterError>;

    /// Total duration of an audio file in seconds, metadata-only.
    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaConverterError>;

    /// Stream-copies `[start, start + duration)` of `source` into `dest`;
    /// `duration == None` runs to end-of-stream.
    async fn extract_segment(
        &self,
        source: &Path,
        start_secs: u64,
        duration_secs: Option<u64>,
        dest: &Path,
    ) -> Result<(), MediaConverterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaConverterError {
    #[error("audio extraction failed: {0}")]
    ConversionFailed(String),
    #[error("duration probe failed: {0}")]
    ProbeFailed(String),
    #[error("segment extraction failed: {0}")]
    SegmentFailed(String),
    #[error("media tool timed out after {0}s")]
    ToolTimeout(u64),
    #[error("media tool could not be spawned: {0}")]
    SpawnFailed(#[from] std::io::Error),
}
