use chrono::{DateTime, Utc};

/// Separator between per-segment texts in the final transcript.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Ordered per-segment transcription results for one job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: String) {
        self.entries.push(text);
    }

    /// Joins the entries in segment order into the final transcript text.
    pub fn join(&self) -> String {
        self.entries.join(SEGMENT_SEPARATOR)
    }
}

/// Filename for a persisted transcript artifact:
/// `<base>_transcription_<timestamp>.txt`, with `:` and `.` in the ISO8601
/// timestamp replaced by `-` so the name is filesystem-safe everywhere.
pub fn transcript_artifact_name(original_filename: &str, generated_at: DateTime<Utc>) -> String {
    let base = original_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(original_filename);
    let timestamp = generated_at
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}_transcription_{}.txt", base, timestamp)
}

/// Artifact body: two header lines, a blank line, then the transcript.
pub fn render_transcript_artifact(
    original_filename: &str,
    generated_at: DateTime<Utc>,
    transcript: &str,
) -> String {
    format!(
        "Transcription for: {}\nGenerated: {}\n\n{}",
        original_filename,
        generated_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        transcript
    )
}
