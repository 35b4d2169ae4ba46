use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{MediaConverter, MediaConverterError};
use crate::domain::{AudioArtifact, SegmentPlan};

/// Splits an audio artifact into ordered, non-overlapping time-bounded
/// segments so that each stays under the remote size ceiling. An artifact
/// already under the ceiling passes through untouched.
pub struct Segmenter<C>
where
    C: MediaConverter,
{
    converter: Arc<C>,
    working_dir: PathBuf,
    ceiling_bytes: u64,
}

/// Ordered segment paths plus the directory that holds them, if one was
/// created. `chunks_dir == None` means the input passed through unsplit and
/// nothing needs cleaning up.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSet {
    pub paths: Vec<PathBuf>,
    pub chunks_dir: Option<PathBuf>,
}

impl<C> Segmenter<C>
where
    C: MediaConverter,
{
    pub fn new(converter: Arc<C>, working_dir: PathBuf, ceiling_bytes: u64) -> Self {
        Self {
            converter,
            working_dir,
            ceiling_bytes,
        }
    }

    pub async fn segment(&self, artifact: &AudioArtifact) -> Result<SegmentSet, SegmenterError> {
        if artifact.size_bytes <= self.ceiling_bytes {
            tracing::debug!(
                path = %artifact.path.display(),
                size_bytes = artifact.size_bytes,
                "Audio under size ceiling, no split needed"
            );
            return Ok(SegmentSet {
                paths: vec![artifact.path.clone()],
                chunks_dir: None,
            });
        }

        // A failed probe must abort the job here; guessing a single segment
        // would silently ship an oversized payload to the remote service.
        let total_duration = self
            .converter
            .probe_duration(&artifact.path)
            .await
            .map_err(|e| SegmenterError::Probe(e.to_string()))?;

        let plan = SegmentPlan::compute(artifact.size_bytes, self.ceiling_bytes, total_duration);

        let chunks_dir = self.working_dir.join(format!(
            "chunks_{}_{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        ));
        tokio::fs::create_dir_all(&chunks_dir).await?;

        tracing::info!(
            path = %artifact.path.display(),
            size_bytes = artifact.size_bytes,
            segments = plan.count,
            segment_duration_secs = plan.segment_duration_secs,
            chunks_dir = %chunks_dir.display(),
            "Splitting audio into segments"
        );

        let mut paths = Vec::with_capacity(plan.count as usize);
        for index in 0..plan.count {
            let dest = chunks_dir.join(format!("segment_{:03}.mp3", index));
            let result = self
                .converter
                .extract_segment(
                    &artifact.path,
                    plan.start_of(index),
                    plan.duration_of(index),
                    &dest,
                )
                .await;

            if let Err(e) = result {
                // Partial segments stay in chunks_dir; the caller's cleanup
                // removes the whole directory.
                return Err(SegmenterError::Extraction {
                    index,
                    source: e,
                    chunks_dir,
                });
            }
            paths.push(dest);
        }

        Ok(SegmentSet {
            paths,
            chunks_dir: Some(chunks_dir),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SegmenterError {
    #[error("duration probe failed: {0}")]
    Probe(String),
    #[error("segment {index} extraction failed: {source}")]
    Extraction {
        index: u64,
        source: MediaConverterError,
        chunks_dir: PathBuf,
    },
    #[error("segment directory could not be created: {0}")]
    Io(#[from] std::io::Error),
}

impl SegmenterError {
    /// Directory holding partial segments, when one was created before the
    /// failure. The pipeline schedules it for cleanup.
    pub fn chunks_dir(&self) -> Option<&PathBuf> {
        match self {
            SegmenterError::Extraction { chunks_dir, .. } => Some(chunks_dir),
            _ => None,
        }
    }
}
