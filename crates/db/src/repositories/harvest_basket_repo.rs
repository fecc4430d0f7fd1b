//! Repository for the `harvest_baskets` table.

use sqlx::PgPool;
use famifarm_core::types::DbId;

use crate::models::event::HarvestBasketRow;

const COLUMNS: &str = "id, event_id, weight_kg";

pub struct HarvestBasketRepo;

impl HarvestBasketRepo {
    /// Baskets of the given harvest events, grouped by event.
    pub async fn list_by_events(
        pool: &PgPool,
        event_ids: &[DbId],
    ) -> Result<Vec<HarvestBasketRow>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM harvest_baskets \
             WHERE event_id = ANY($1) \
             ORDER BY event_id, id"
        );
        sqlx::query_as::<_, HarvestBasketRow>(&query)
            .bind(event_ids)
            .fetch_all(pool)
            .await
    }
}
