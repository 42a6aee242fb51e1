// Pipeline error taxonomy. Every variant degrades to a warning or an HTTP error body;
// none of them is fatal to the host.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The backing store could not be reached or failed the query.
    #[error("sensor readings unavailable: {0}")]
    DataUnavailable(String),

    #[error("reading limit must be greater than zero")]
    InvalidLimit,

    /// A feed payload or ingested record did not have the SensorReading shape.
    #[error("malformed reading payload: {0}")]
    MalformedPayload(String),

    #[error("export failed: {0}")]
    Export(String),
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = match self {
            PipelineError::DataUnavailable(ref e) => {
                tracing::warn!(error = %e, "serving request without fresh readings");
                StatusCode::SERVICE_UNAVAILABLE
            }
            PipelineError::InvalidLimit | PipelineError::MalformedPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            PipelineError::Export(ref e) => {
                tracing::error!(error = %e, "export failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
