pub mod media;
pub mod observability;
pub mod storage;
pub mod transcription;
