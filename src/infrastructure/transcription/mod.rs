mod openai_whisper_client;

pub use openai_whisper_client::{
    OpenAiWhisperClient, REMOTE_PAYLOAD_CEILING_BYTES, REMOTE_TIMEOUT_SECS,
};
