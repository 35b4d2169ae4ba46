use crate::domain::{JobId, JobStatus};

/// Per-job progress observer, passed by the caller and torn down with the
/// job. Replaces any notion of a global subscriber registry.
pub trait ProgressSink: Send + Sync {
    fn report(&self, job_id: JobId, status: JobStatus);
}

/// Default sink: emits progress as structured log events.
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn report(&self, job_id: JobId, status: JobStatus) {
        tracing::info!(job_id = %job_id.as_uuid(), status = %status, "Job progress");
    }
}

/// Forwards progress into a tokio channel; dropped receivers are ignored so
/// an abandoned subscriber never blocks the pipeline.
pub struct ChannelProgressSink {
    sender: tokio::sync::mpsc::UnboundedSender<(JobId, JobStatus)>,
}

impl ChannelProgressSink {
    pub fn new(sender: tokio::sync::mpsc::UnboundedSender<(JobId, JobStatus)>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, job_id: JobId, status: JobStatus) {
        let _ = self.sender.send((job_id, status));
    }
}
