use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::JobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

/// One end-to-end invocation of the pipeline for one source media handle.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub original_filename: String,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(original_filename: String) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            original_filename,
            status: JobStatus::Received,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn transition(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error_message = Some(message.into());
        self.updated_at = Utc::now();
    }
}
