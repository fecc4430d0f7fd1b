//! Event and harvest basket rows.

use serde::Serialize;
use sqlx::FromRow;
use famifarm_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// A row of `events`. Subtype columns are `None` for event types that do
/// not use them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRow {
    pub id: DbId,
    pub facility: String,
    pub event_type: String,
    pub product_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub creator_id: Uuid,
    pub production_line_id: Option<DbId>,
    pub amount: Option<i64>,
    pub pot_type: Option<String>,
    pub tray_count: Option<i32>,
    pub gutter_count: Option<i32>,
    pub gutter_hole_count: Option<i32>,
    pub sowing_date: Option<Timestamp>,
    pub cell_count: Option<i32>,
    pub worker_count: Option<i32>,
    pub harvest_type: Option<String>,
    pub cutting_height: Option<i32>,
    pub wastage_phase: Option<String>,
    pub wastage_reason: Option<String>,
    pub additional_information: Option<String>,
    pub weight: Option<f64>,
    pub luminance: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HarvestBasketRow {
    pub id: DbId,
    pub event_id: DbId,
    pub weight_kg: f64,
}
