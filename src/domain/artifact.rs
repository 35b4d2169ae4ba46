use std::path::PathBuf;

/// An audio file the pipeline transcribes from. `derived` marks artifacts the
/// pipeline produced itself (audio extracted from a video); only those are
/// deleted at job end. The original source is never cleaned up.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub derived: bool,
}

impl AudioArtifact {
    pub fn original(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            derived: false,
        }
    }

    pub fn derived(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            derived: true,
        }
    }
}
