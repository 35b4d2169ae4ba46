mod media_converter;
mod progress_sink;
mod transcript_store;
mod transcription_client;

pub use media_converter::{MediaConverter, MediaConverterError};
pub use progress_sink::{ChannelProgressSink, ProgressSink, TracingProgressSink};
pub use transcript_store::{TranscriptStore, TranscriptStoreError};
pub use transcription_client::{TranscriptionClient, TranscriptionClientError};
