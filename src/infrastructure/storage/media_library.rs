use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{TranscriptStore, TranscriptStoreError};

/// Extensions served by the library listing: media inputs plus persisted
/// transcript artifacts.
const KNOWN_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "wmv", "mkv", "webm", "mp3", "wav", "m4a", "aac", "txt",
];

/// Marker in transcript artifact filenames.
const TRANSCRIPT_MARKER: &str = "_transcription_";

/// The shared working directory: uploads, derived audio, segment directories
/// and persisted transcripts all live under it. Every name-based operation
/// resolves inside the directory and rejects escapes.
pub struct MediaLibrary {
    base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub name: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
    pub is_transcript: bool,
}

impl MediaLibrary {
    pub fn new(base_dir: PathBuf) -> Result<Self, MediaLibraryError> {
        std::fs::create_dir_all(&base_dir)?;
        let base_dir = base_dir.canonicalize()?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves `name` to a path inside the library. The name must be a
    /// single plain component; separators, `..` and absolute paths are
    /// rejected before touching the filesystem.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, MediaLibraryError> {
        let candidate = Path::new(name);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(MediaLibraryError::AccessDenied(format!(
                    "illegal file name: {}",
                    name
                )));
            }
        }

        let path = self.base_dir.join(name);
        if let Ok(resolved) = path.canonicalize() {
            if !resolved.starts_with(&self.base_dir) {
                return Err(MediaLibraryError::AccessDenied(format!(
                    "path escapes library: {}",
                    name
                )));
            }
        }
        Ok(path)
    }

    /// Known media and transcript files, newest first.
    pub async fn list(&self) -> Result<Vec<LibraryEntry>, MediaLibraryError> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = dir.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let known = Path::new(&name)
                .extension()
                .map(|e| e.to_ascii_lowercase())
                .is_some_and(|e| KNOWN_EXTENSIONS.contains(&e.to_string_lossy().as_ref()));
            if !known {
                continue;
            }

            let modified: DateTime<Utc> = metadata
                .modified()
                .map(DateTime::from)
                .unwrap_or_else(|_| Utc::now());

            entries.push(LibraryEntry {
                is_transcript: name.contains(TRANSCRIPT_MARKER),
                size_bytes: metadata.len(),
                modified,
                name,
            });
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(entries)
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, MediaLibraryError> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(MediaLibraryError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn size_of(&self, name: &str) -> Result<u64, MediaLibraryError> {
        let path = self.resolve(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(MediaLibraryError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates a file for an incoming upload; the handler streams into it.
    pub async fn create_file(&self, name: &str) -> Result<(tokio::fs::File, PathBuf), MediaLibraryError> {
        let path = self.resolve(name)?;
        let file = tokio::fs::File::create(&path).await?;
        Ok((file, path))
    }
}

#[async_trait]
impl TranscriptStore for MediaLibrary {
    async fn save_transcript(
        &self,
        name: &str,
        content: &str,
    ) -> Result<(), TranscriptStoreError> {
        let path = self
            .resolve(name)
            .map_err(|e| TranscriptStoreError::AccessDenied(e.to_string()))?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| TranscriptStoreError::WriteFailed(e.to_string()))?;
        tracing::info!(path = %path.display(), "Transcript persisted");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MediaLibraryError {
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
