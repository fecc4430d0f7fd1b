//! Repository for the `packing_baskets` table.

use sqlx::PgPool;
use famifarm_core::types::DbId;

use crate::models::packing::PackingBasketRow;

const COLUMNS: &str = "id, packing_id, product_id, count";

pub struct PackingBasketRepo;

impl PackingBasketRepo {
    pub async fn list_by_packings(
        pool: &PgPool,
        packing_ids: &[DbId],
    ) -> Result<Vec<PackingBasketRow>, sqlx::Error> {
        if packing_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM packing_baskets \
             WHERE packing_id = ANY($1) \
             ORDER BY packing_id, id"
        );
        sqlx::query_as::<_, PackingBasketRow>(&query)
            .bind(packing_ids)
            .fetch_all(pool)
            .await
    }
}
