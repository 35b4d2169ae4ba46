mod artifact;
mod job;
mod job_status;
mod media_source;
mod segment_plan;
mod transcript;

pub use artifact::AudioArtifact;
pub use job::{Job, JobId};
pub use job_status::JobStatus;
pub use media_source::{MediaKind, SourceMedia};
pub use segment_plan::SegmentPlan;
pub use transcript::{
    render_transcript_artifact, transcript_artifact_name, Transcript, SEGMENT_SEPARATOR,
};
