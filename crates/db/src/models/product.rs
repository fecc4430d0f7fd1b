//! Product, product name and production line rows.

use serde::Serialize;
use sqlx::FromRow;
use famifarm_core::types::DbId;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductRow {
    pub id: DbId,
    pub facility: String,
    pub is_raw_material: bool,
    pub is_end_product: bool,
    pub is_active: bool,
}

/// One translation of a product name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductNameRow {
    pub product_id: DbId,
    pub language: String,
    pub value: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionLineRow {
    pub id: DbId,
    pub facility: String,
    pub line_number: String,
    pub default_gutter_hole_count: Option<i32>,
}
