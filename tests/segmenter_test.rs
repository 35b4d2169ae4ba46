use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mediascribe::application::ports::{MediaConverter, MediaConverterError};
use mediascribe::application::services::{Segmenter, SegmenterError};
use mediascribe::domain::AudioArtifact;

const MIB: u64 = 1024 * 1024;
const CEILING: u64 = 25 * MIB;

#[derive(Debug, Clone, PartialEq)]
struct SegmentCall {
    start_secs: u64,
    duration_secs: Option<u64>,
    dest: PathBuf,
}

struct StubConverter {
    duration: Result<f64, String>,
    probe_calls: AtomicUsize,
    segment_calls: Mutex<Vec<SegmentCall>>,
    fail_segment_index: Option<usize>,
}

impl StubConverter {
    fn with_duration(duration: f64) -> Self {
        Self {
            duration: Ok(duration),
            probe_calls: AtomicUsize::new(0),
            segment_calls: Mutex::new(Vec::new()),
            fail_segment_index: None,
        }
    }

    fn with_probe_failure(message: &str) -> Self {
        Self {
            duration: Err(message.to_string()),
            probe_calls: AtomicUsize::new(0),
            segment_calls: Mutex::new(Vec::new()),
            fail_segment_index: None,
        }
    }

    fn failing_segment(duration: f64, index: usize) -> Self {
        Self {
            duration: Ok(duration),
            probe_calls: AtomicUsize::new(0),
            segment_calls: Mutex::new(Vec::new()),
            fail_segment_index: Some(index),
        }
    }
}

#[async_trait]
impl MediaConverter for StubConverter {
    async fn extract_audio(&self, _source: &Path, _dest: &Path) -> Result<(), MediaConverterError> {
        unreachable!("segmenter never converts");
    }

    async fn probe_duration(&self, _path: &Path) -> Result<f64, MediaConverterError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.duration
            .clone()
            .map_err(MediaConverterError::ProbeFailed)
    }

    async fn extract_segment(
        &self,
        _source: &Path,
        start_secs: u64,
        duration_secs: Option<u64>,
        dest: &Path,
    ) -> Result<(), MediaConverterError> {
        let index = {
            let mut calls = self.segment_calls.lock().unwrap();
            calls.push(SegmentCall {
                start_secs,
                duration_secs,
                dest: dest.to_path_buf(),
            });
            calls.len() - 1
        };
        if self.fail_segment_index == Some(index) {
            return Err(MediaConverterError::SegmentFailed("boom".to_string()));
        }
        tokio::fs::write(dest, b"segment").await?;
        Ok(())
    }
}

fn audio_file(dir: &Path, name: &str, size: u64) -> AudioArtifact {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(size).unwrap();
    AudioArtifact::original(path, size)
}

#[tokio::test]
async fn given_audio_under_ceiling_when_segmenting_then_input_passes_through() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = audio_file(dir.path(), "small.mp3", 10 * MIB);
    let converter = Arc::new(StubConverter::with_duration(600.0));
    let segmenter = Segmenter::new(Arc::clone(&converter), dir.path().to_path_buf(), CEILING);

    let set = segmenter.segment(&artifact).await.unwrap();

    assert_eq!(set.paths, vec![artifact.path.clone()]);
    assert!(set.chunks_dir.is_none());
    // No probe, no copies: the directory still holds exactly the input.
    assert_eq!(converter.probe_calls.load(Ordering::SeqCst), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn given_oversized_audio_when_segmenting_then_ordered_partition_is_produced() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = audio_file(dir.path(), "big.mp3", 60 * MIB);
    let converter = Arc::new(StubConverter::with_duration(3600.0));
    let segmenter = Segmenter::new(Arc::clone(&converter), dir.path().to_path_buf(), CEILING);

    let set = segmenter.segment(&artifact).await.unwrap();

    assert_eq!(set.paths.len(), 3);
    let chunks_dir = set.chunks_dir.as_ref().unwrap();
    for (index, path) in set.paths.iter().enumerate() {
        assert!(path.starts_with(chunks_dir));
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("segment_{:03}.mp3", index)
        );
        assert!(path.exists());
    }

    let calls = converter.segment_calls.lock().unwrap();
    assert_eq!(
        calls
            .iter()
            .map(|c| (c.start_secs, c.duration_secs))
            .collect::<Vec<_>>(),
        vec![(0, Some(1200)), (1200, Some(1200)), (2400, None)]
    );
}

#[tokio::test]
async fn given_probe_failure_when_segmenting_then_job_aborts_without_fallback() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = audio_file(dir.path(), "big.mp3", 30 * MIB);
    let converter = Arc::new(StubConverter::with_probe_failure("no duration"));
    let segmenter = Segmenter::new(Arc::clone(&converter), dir.path().to_path_buf(), CEILING);

    let result = segmenter.segment(&artifact).await;

    assert!(matches!(result, Err(SegmenterError::Probe(_))));
    assert!(converter.segment_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_extraction_failure_when_segmenting_then_chunks_dir_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = audio_file(dir.path(), "big.mp3", 60 * MIB);
    let converter = Arc::new(StubConverter::failing_segment(3600.0, 1));
    let segmenter = Segmenter::new(Arc::clone(&converter), dir.path().to_path_buf(), CEILING);

    let result = segmenter.segment(&artifact).await;

    let err = result.unwrap_err();
    let chunks_dir = err.chunks_dir().expect("partial chunks dir").clone();
    assert!(chunks_dir.exists());
    // Only the first segment landed before the failure.
    assert_eq!(std::fs::read_dir(&chunks_dir).unwrap().count(), 1);
    // No further segments were attempted after the failure.
    assert_eq!(converter.segment_calls.lock().unwrap().len(), 2);
}
