//! Handlers for report listing and download.

use axum::extract::{Path, Query, State};
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use famifarm_core::facility::Facility;
use famifarm_core::locale::Locale;
use famifarm_core::reporting::dispatch::{generate_report, ReportRequest};
use famifarm_core::reporting::report_type::{ReportFamily, ReportFormat, ReportType};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::ReportQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// One entry of the report catalogue.
#[derive(Debug, Serialize)]
pub struct ReportTypeInfo {
    pub id: &'static str,
    pub family: ReportFamily,
    pub formats: &'static [ReportFormat],
    pub default_format: ReportFormat,
}

/// GET /api/v1/reports/types
pub async fn list_report_types() -> Json<DataResponse<Vec<ReportTypeInfo>>> {
    let data = ReportType::ALL
        .into_iter()
        .map(|t| ReportTypeInfo {
            id: t.id(),
            family: t.family(),
            formats: &ReportFormat::ALL,
            default_format: ReportFormat::default(),
        })
        .collect();
    Json(DataResponse { data })
}

/// GET /api/v1/facilities/{facility}/reports/{report_type}
///
/// Locale comes from `?locale=`, then `Accept-Language`, then the server
/// default.
pub async fn get_report(
    State(state): State<AppState>,
    Path((facility, report_type)): Path<(String, String)>,
    Query(params): Query<ReportQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let facility: Facility = facility.parse()?;
    let locale = resolve_locale(&params, &headers, state.config.default_locale)?;

    let request = ReportRequest::parse(
        facility,
        &report_type,
        params.from_time.as_deref(),
        params.to_time.as_deref(),
        locale,
        params.format.as_deref(),
    )?;

    let report = generate_report(state.store.as_ref(), &request).await?;

    tracing::info!(
        facility = %facility,
        report_type = %request.report_type,
        format = %request.effective_format(),
        locale = %locale,
        bytes = report.bytes.len(),
        "Report generated"
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, report.content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.filename),
            ),
        ],
        report.bytes,
    ))
}

fn resolve_locale(
    params: &ReportQuery,
    headers: &HeaderMap,
    default: Locale,
) -> AppResult<Locale> {
    if let Some(tag) = params.locale.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(tag.parse()?);
    }
    Ok(headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(Locale::from_accept_language)
        .unwrap_or(default))
}
