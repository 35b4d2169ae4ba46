use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{MediaConverter, MediaConverterError};

/// Audio bitrate for extracted tracks; compact output keeps segments small.
const AUDIO_BITRATE: &str = "64k";
/// Sample rate for extracted tracks.
const AUDIO_SAMPLE_RATE: &str = "22050";
/// Default upper bound for one ffmpeg/ffprobe invocation.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 1800;

/// `MediaConverter` backed by the ffmpeg and ffprobe binaries.
pub struct FfmpegConverter {
    ffmpeg_bin: String,
    ffprobe_bin: String,
    timeout_secs: u64,
}

impl FfmpegConverter {
    pub fn new(ffmpeg_bin: impl Into<String>, ffprobe_bin: impl Into<String>) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
            ffprobe_bin: ffprobe_bin.into(),
            timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    async fn run(&self, mut command: Command) -> Result<std::process::Output, MediaConverterError> {
        command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        // A timed-out invocation drops the child; without this the tool
        // process would keep running detached.
        command.kill_on_drop(true);

        let child = command.spawn()?;
        let output = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| MediaConverterError::ToolTimeout(self.timeout_secs))??;

        Ok(output)
    }
}

impl Default for FfmpegConverter {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

#[async_trait]
impl MediaConverter for FfmpegConverter {
    async fn extract_audio(&self, source: &Path, dest: &Path) -> Result<(), MediaConverterError> {
        let mut command = Command::new(&self.ffmpeg_bin);
        command
            .arg("-i")
            .arg(source)
            .arg("-vn")
            .arg("-acodec")
            .arg("mp3")
            .arg("-ab")
            .arg(AUDIO_BITRATE)
            .arg("-ac")
            .arg("1")
            .arg("-ar")
            .arg(AUDIO_SAMPLE_RATE)
            .arg("-y")
            .arg(dest);

        tracing::debug!(
            source = %source.display(),
            dest = %dest.display(),
            "Extracting audio track"
        );

        let output = self.run(command).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaConverterError::ConversionFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // ffmpeg can exit zero without producing output on some inputs.
        match tokio::fs::metadata(dest).await {
            Ok(_) => Ok(()),
            Err(_) => Err(MediaConverterError::ConversionFailed(format!(
                "ffmpeg produced no output at {}",
                dest.display()
            ))),
        }
    }

    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaConverterError> {
        let mut command = Command::new(&self.ffprobe_bin);
        command
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(path);

        let output = self.run(command).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaConverterError::ProbeFailed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration: f64 = stdout
            .trim()
            .parse()
            .map_err(|_| MediaConverterError::ProbeFailed(format!("bad duration: {:?}", stdout.trim())))?;

        if !duration.is_finite() || duration < 0.0 {
            return Err(MediaConverterError::ProbeFailed(format!(
                "negative or non-finite duration: {}",
                duration
            )));
        }

        Ok(duration)
    }

    async fn extract_segment(
        &self,
        source: &Path,
        start_secs: u64,
        duration_secs: Option<u64>,
        dest: &Path,
    ) -> Result<(), MediaConverterError> {
        let mut command = Command::new(&self.ffmpeg_bin);
        command.arg("-i").arg(source).arg("-ss").arg(start_secs.to_string());
        if let Some(duration) = duration_secs {
            command.arg("-t").arg(duration.to_string());
        }
        // Stream copy: no re-encode, splitting stays fast even for long files.
        command.arg("-acodec").arg("copy").arg("-y").arg(dest);

        tracing::debug!(
            source = %source.display(),
            dest = %dest.display(),
            start_secs,
            duration_secs,
            "Extracting audio segment"
        );

        let output = self.run(command).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaConverterError::SegmentFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
