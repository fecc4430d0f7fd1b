use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use famifarm_core::error::{CoreError, ReportError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors of `famifarm_core`. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed report request.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- ReportError variants ---
            AppError::Report(report) => classify_report_error(report),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Request problems map to 400; generation failures are logged and map
/// to 500 with a sanitized message.
fn classify_report_error(err: &ReportError) -> (StatusCode, &'static str, String) {
    let code = match err {
        ReportError::UnknownReportType(_) => "UNKNOWN_REPORT_TYPE",
        ReportError::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
        ReportError::InvalidField { .. } => "INVALID_FIELD",
        ReportError::Generation(msg) => {
            tracing::error!(error = %msg, "Report generation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "REPORT_GENERATION_FAILED",
                "Report generation failed".to_string(),
            );
        }
    };
    (StatusCode::BAD_REQUEST, code, err.to_string())
}
