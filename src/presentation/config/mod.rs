mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, ServerSettings, Settings, StorageSettings, WhisperSettings,
    SEGMENT_CEILING_BYTES, UPLOAD_CEILING_BYTES,
};
