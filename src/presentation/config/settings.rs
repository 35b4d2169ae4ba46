use std::path::PathBuf;

use serde::Deserialize;

/// Largest accepted upload body.
pub const UPLOAD_CEILING_BYTES: u64 = 1500 * 1024 * 1024;
/// Audio files above this are split before transcription.
pub const SEGMENT_CEILING_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub whisper: WhisperSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Shared working directory for uploads, derived audio and transcripts.
    pub working_dir: PathBuf,
    /// Static UI files served at the root.
    pub public_dir: PathBuf,
    pub upload_ceiling_bytes: u64,
    pub segment_ceiling_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperSettings {
    /// Missing key does not block startup; each job fails with a
    /// configuration error instead.
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub ffmpeg_bin: String,
    pub ffprobe_bin: String,
    pub tool_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access_password: String,
    pub token_ttl_hours: i64,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            storage: StorageSettings {
                working_dir: std::env::var("UPLOADS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("uploads")),
                public_dir: std::env::var("PUBLIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("public")),
                upload_ceiling_bytes: UPLOAD_CEILING_BYTES,
                segment_ceiling_bytes: SEGMENT_CEILING_BYTES,
            },
            whisper: WhisperSettings {
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
                model: std::env::var("WHISPER_MODEL").ok(),
                ffmpeg_bin: std::env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()),
                ffprobe_bin: std::env::var("FFPROBE_BIN")
                    .unwrap_or_else(|_| "ffprobe".to_string()),
                tool_timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(crate::infrastructure::media::DEFAULT_TOOL_TIMEOUT_SECS),
            },
            auth: AuthSettings {
                access_password: std::env::var("ACCESS_PASSWORD")
                    .unwrap_or_else(|_| "changeme".to_string()),
                token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(7 * 24),
            },
        }
    }
}
