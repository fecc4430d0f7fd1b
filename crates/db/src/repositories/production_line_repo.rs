//! Repository for the `production_lines` table.

use sqlx::PgPool;

use crate::models::product::ProductionLineRow;

const COLUMNS: &str = "id, facility, line_number, default_gutter_hole_count";

pub struct ProductionLineRepo;

impl ProductionLineRepo {
    pub async fn list_by_facility(
        pool: &PgPool,
        facility: &str,
    ) -> Result<Vec<ProductionLineRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM production_lines WHERE facility = $1 ORDER BY line_number, id"
        );
        sqlx::query_as::<_, ProductionLineRow>(&query)
            .bind(facility)
            .fetch_all(pool)
            .await
    }
}
