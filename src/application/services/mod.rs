mod segmenter;
mod transcription_pipeline;

pub use segmenter::{Segmenter, SegmenterError, SegmentSet};
pub use transcription_pipeline::{CleanupSet, JobOutcome, PipelineError, TranscriptionPipeline};
