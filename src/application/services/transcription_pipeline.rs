use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use crate::application::ports::{
    MediaConverter, MediaConverterError, ProgressSink, TranscriptStore, TranscriptStoreError,
    TranscriptionClient, TranscriptionClientError,
};
use crate::application::services::{Segmenter, SegmenterError};
use crate::domain::{
    render_transcript_artifact, transcript_artifact_name, AudioArtifact, Job, JobStatus,
    MediaKind, SourceMedia, Transcript,
};

/// Orchestrates one transcription job:
/// convert-if-video → segment-if-oversized → transcribe each segment in
/// order → join → persist → cleanup. Every stage failure aborts the job; no
/// partial transcript is ever returned. Cleanup of derived artifacts runs on
/// success and failure alike.
pub struct TranscriptionPipeline<C, T>
where
    C: MediaConverter,
    T: TranscriptionClient,
{
    converter: Arc<C>,
    segmenter: Segmenter<C>,
    client: Arc<T>,
    store: Arc<dyn TranscriptStore>,
    working_dir: PathBuf,
}

/// Result of a successful job: the joined transcript and the name of the
/// persisted artifact.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job: Job,
    pub transcript: String,
    pub artifact_name: String,
}

impl<C, T> TranscriptionPipeline<C, T>
where
    C: MediaConverter,
    T: TranscriptionClient,
{
    pub fn new(
        converter: Arc<C>,
        client: Arc<T>,
        store: Arc<dyn TranscriptStore>,
        working_dir: PathBuf,
        segment_ceiling_bytes: u64,
    ) -> Self {
        let segmenter = Segmenter::new(
            Arc::clone(&converter),
            working_dir.clone(),
            segment_ceiling_bytes,
        );
        Self {
            converter,
            segmenter,
            client,
            store,
            working_dir,
        }
    }

    pub async fn run_job(
        &self,
        source: SourceMedia,
        original_filename: &str,
        progress: &dyn ProgressSink,
    ) -> Result<JobOutcome, PipelineError> {
        let mut job = Job::new(original_filename.to_string());

        let span = tracing::info_span!(
            "transcription_job",
            job_id = %job.id.as_uuid(),
            filename = %job.original_filename,
            size_bytes = source.size_bytes,
        );

        async {
            let mut cleanup = CleanupSet::default();
            progress.report(job.id, JobStatus::Received);

            let result = self
                .run_stages(&mut job, &source, original_filename, progress, &mut cleanup)
                .await;

            cleanup.run().await;

            match result {
                Ok(outcome) => {
                    job.transition(JobStatus::Completed);
                    progress.report(job.id, JobStatus::Completed);
                    tracing::info!(artifact = %outcome.artifact_name, "Transcription job completed");
                    Ok(JobOutcome { job, ..outcome })
                }
                Err(e) => {
                    job.fail(e.to_string());
                    progress.report(job.id, JobStatus::Failed);
                    tracing::error!(error = %e, "Transcription job failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_stages(
        &self,
        job: &mut Job,
        source: &SourceMedia,
        original_filename: &str,
        progress: &dyn ProgressSink,
        cleanup: &mut CleanupSet,
    ) -> Result<JobOutcome, PipelineError> {
        // A client that cannot finish any segment must stop the job before
        // conversion or segmentation touch the media.
        self.client.ensure_configured()?;

        let audio = match source.kind {
            MediaKind::Audio => AudioArtifact::original(&source.path, source.size_bytes),
            MediaKind::Video => {
                job.transition(JobStatus::Converting);
                progress.report(job.id, JobStatus::Converting);
                self.convert_to_audio(source, cleanup).await?
            }
        };

        job.transition(JobStatus::Segmenting);
        progress.report(job.id, JobStatus::Segmenting);

        let segments = match self.segmenter.segment(&audio).await {
            Ok(set) => {
                if let Some(dir) = &set.chunks_dir {
                    cleanup.add_dir(dir.clone());
                }
                set
            }
            Err(e) => {
                if let Some(dir) = e.chunks_dir() {
                    cleanup.add_dir(dir.clone());
                }
                return Err(e.into());
            }
        };

        job.transition(JobStatus::Transcribing);
        progress.report(job.id, JobStatus::Transcribing);

        let mut transcript = Transcript::new();
        for (index, segment) in segments.paths.iter().enumerate() {
            tracing::debug!(
                segment = index,
                total = segments.paths.len(),
                path = %segment.display(),
                "Transcribing segment"
            );
            let text = self.client.transcribe(segment).await?;
            transcript.push(text);
        }

        job.transition(JobStatus::Joining);
        progress.report(job.id, JobStatus::Joining);
        let full_text = transcript.join();

        job.transition(JobStatus::Persisting);
        progress.report(job.id, JobStatus::Persisting);

        let generated_at = Utc::now();
        let artifact_name = transcript_artifact_name(original_filename, generated_at);
        let content = render_transcript_artifact(original_filename, generated_at, &full_text);
        self.store.save_transcript(&artifact_name, &content).await?;

        Ok(JobOutcome {
            job: job.clone(),
            transcript: full_text,
            artifact_name,
        })
    }

    async fn convert_to_audio(
        &self,
        source: &SourceMedia,
        cleanup: &mut CleanupSet,
    ) -> Result<AudioArtifact, PipelineError> {
        let dest = self.working_dir.join(format!(
            "audio_{}_{}.mp3",
            Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        ));
        // Registered before the tool runs so a half-written file is removed
        // when extraction fails.
        cleanup.add_file(dest.clone());

        self.converter.extract_audio(&source.path, &dest).await?;

        let size_bytes = tokio::fs::metadata(&dest)
            .await
            .map_err(|e| PipelineError::Conversion(format!("output missing: {}", e)))?
            .len();

        tracing::info!(
            audio = %dest.display(),
            size_bytes,
            "Audio extracted from video"
        );

        Ok(AudioArtifact::derived(dest, size_bytes))
    }
}

/// Temporary artifacts to delete when a job reaches a terminal state.
/// Deletion is best-effort and idempotent: missing paths are fine, other
/// failures are logged and never escalated.
#[derive(Debug, Default)]
pub struct CleanupSet {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl CleanupSet {
    pub fn add_file(&mut self, path: PathBuf) {
        self.files.push(path);
    }

    pub fn add_dir(&mut self, path: PathBuf) {
        self.dirs.push(path);
    }

    pub async fn run(&self) {
        for file in &self.files {
            match tokio::fs::remove_file(file).await {
                Ok(()) => tracing::debug!(path = %file.display(), "Removed temporary file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "Cleanup of file failed")
                }
            }
        }
        for dir in &self.dirs {
            match tokio::fs::remove_dir_all(dir).await {
                Ok(()) => tracing::debug!(path = %dir.display(), "Removed segment directory"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "Cleanup of directory failed")
                }
            }
        }
    }
}

/// Single failure reported for a job; every stage maps into exactly one
/// variant and no partial transcript accompanies it.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("transcription service is not configured: {0}")]
    Configuration(String),
    #[error("audio conversion failed: {0}")]
    Conversion(String),
    #[error("duration probe failed: {0}")]
    Probe(String),
    #[error("audio segmentation failed: {0}")]
    Segmentation(String),
    #[error("segment is {size_bytes} bytes, exceeds the {ceiling_bytes} byte service limit")]
    PayloadTooLarge { size_bytes: u64, ceiling_bytes: u64 },
    #[error("transcription service returned {status}: {body}")]
    Service { status: u16, body: String },
    #[error("transcription request timed out after {0}s")]
    Timeout(u64),
    #[error("transcript could not be persisted: {0}")]
    Persistence(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
}

impl From<MediaConverterError> for PipelineError {
    fn from(e: MediaConverterError) -> Self {
        match e {
            MediaConverterError::ProbeFailed(msg) => PipelineError::Probe(msg),
            MediaConverterError::ToolTimeout(secs) => {
                PipelineError::Conversion(format!("media tool timed out after {}s", secs))
            }
            other => PipelineError::Conversion(other.to_string()),
        }
    }
}

impl From<SegmenterError> for PipelineError {
    fn from(e: SegmenterError) -> Self {
        match e {
            SegmenterError::Probe(msg) => PipelineError::Segmentation(format!("probe: {}", msg)),
            other => PipelineError::Segmentation(other.to_string()),
        }
    }
}

impl From<TranscriptionClientError> for PipelineError {
    fn from(e: TranscriptionClientError) -> Self {
        match e {
            TranscriptionClientError::Configuration(msg) => PipelineError::Configuration(msg),
            TranscriptionClientError::PayloadTooLarge {
                size_bytes,
                ceiling_bytes,
            } => PipelineError::PayloadTooLarge {
                size_bytes,
                ceiling_bytes,
            },
            TranscriptionClientError::Service { status, body } => {
                PipelineError::Service { status, body }
            }
            TranscriptionClientError::Timeout(secs) => PipelineError::Timeout(secs),
            // A local read failure is a bad segment artifact, not a remote
            // service response.
            TranscriptionClientError::Io(e) => {
                PipelineError::Segmentation(format!("segment could not be read: {}", e))
            }
        }
    }
}

impl From<TranscriptStoreError> for PipelineError {
    fn from(e: TranscriptStoreError) -> Self {
        match e {
            TranscriptStoreError::AccessDenied(msg) => PipelineError::AccessDenied(msg),
            TranscriptStoreError::WriteFailed(msg) => PipelineError::Persistence(msg),
        }
    }
}
