pub mod health;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports/types                                   list report types
/// /facilities/{facility}/reports/{report_type}     download a report
///                                                  ?fromTime=&toTime=&format=&locale=
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(reports::router())
}
