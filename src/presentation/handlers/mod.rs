mod auth;
mod download;
mod health;
mod server_files;
mod transcribe;
mod transcribe_server_file;

pub use auth::{auth_check_handler, login_handler};
pub use download::download_handler;
pub use health::health_handler;
pub use server_files::server_files_handler;
pub use transcribe::transcribe_handler;
pub use transcribe_server_file::transcribe_server_file_handler;

use axum::http::StatusCode;
use serde::Serialize;

use crate::application::services::PipelineError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

pub(crate) fn pipeline_error_status(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        PipelineError::Service { .. } => StatusCode::BAD_GATEWAY,
        PipelineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        PipelineError::AccessDenied(_) => StatusCode::FORBIDDEN,
        PipelineError::Conversion(_)
        | PipelineError::Probe(_)
        | PipelineError::Segmentation(_)
        | PipelineError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
