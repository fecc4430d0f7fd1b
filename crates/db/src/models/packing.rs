//! Packing rows joined with their package size.

use serde::Serialize;
use sqlx::FromRow;
use famifarm_core::types::{DbId, Timestamp};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackingRow {
    pub id: DbId,
    pub facility: String,
    pub product_id: DbId,
    pub packed_count: i32,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub creator_id: Uuid,
    pub package_size_id: DbId,
    pub package_size_name: String,
    pub package_size: i32,
}

/// Raw material consumed by a packing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackingBasketRow {
    pub id: DbId,
    pub packing_id: DbId,
    pub product_id: DbId,
    pub count: i32,
}
