use std::path::PathBuf;

/// A reference to an input file handed to the pipeline by the upload or
/// storage layer. The pipeline never mutates or deletes the file behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMedia {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub size_bytes: u64,
}

impl SourceMedia {
    pub fn new(path: PathBuf, kind: MediaKind, size_bytes: u64) -> Self {
        Self {
            path,
            kind,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "mkv", "webm"];

impl MediaKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            m if m.starts_with("audio/") => Some(Self::Audio),
            m if m.starts_with("video/") => Some(Self::Video),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Audio)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        filename
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }
}
