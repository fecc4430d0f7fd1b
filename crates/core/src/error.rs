use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failures of a single report invocation.
///
/// Every variant is terminal for the request: the dispatcher never retries
/// and never returns a partially written report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown report type: {0}")]
    UnknownReportType(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Report generation failed: {0}")]
    Generation(String),
}

impl From<CoreError> for ReportError {
    fn from(err: CoreError) -> Self {
        ReportError::Generation(err.to_string())
    }
}
