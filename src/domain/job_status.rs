use std::fmt;

/// Pipeline stages for one transcription job. `Failed` is reachable from
/// every non-terminal state; `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Received,
    Converting,
    Segmenting,
    Transcribing,
    Joining,
    Persisting,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Received => "RECEIVED",
            JobStatus::Converting => "CONVERTING",
            JobStatus::Segmenting => "SEGMENTING",
            JobStatus::Transcribing => "TRANSCRIBING",
            JobStatus::Joining => "JOINING",
            JobStatus::Persisting => "PERSISTING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
