//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?fromTime=&toTime=&format=&locale=` of a report download.
///
/// Everything is optional at this layer so missing values surface as
/// report errors with the parameter name rather than a generic 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    pub format: Option<String>,
    pub locale: Option<String>,
}
