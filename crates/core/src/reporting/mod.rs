//! Report aggregation pipeline.
//!
//! A report run is: fetch events from an [`store::EventStore`], fold them
//! into per-product [`accumulate::AggregationRow`]s (or plant units per
//! phase, see [`units`]), derive rates, write cells into a [`sheet::Sheet`]
//! and finally encode the sheet (or a JSON record list) into the requested
//! [`report_type::ReportFormat`].
//! [`dispatch::generate_report`] drives the whole sequence.

pub mod accumulate;
pub mod counts;
pub mod csv;
pub mod cultivation;
pub mod dispatch;
pub mod json;
pub mod layout;
pub mod list;
pub mod rates;
pub mod report_type;
pub mod sheet;
pub mod store;
pub mod summary;
pub mod units;
pub mod work_hours;
pub mod xlsx;
