use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes, merged into `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/types", get(reports::list_report_types))
        .route(
            "/facilities/{facility}/reports/{report_type}",
            get(reports::get_report),
        )
}
