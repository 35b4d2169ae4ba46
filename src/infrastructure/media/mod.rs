mod ffmpeg_converter;

pub use ffmpeg_converter::{FfmpegConverter, DEFAULT_TOOL_TIMEOUT_SECS};
