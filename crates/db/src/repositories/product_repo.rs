//! Repository for the `products` and `product_names` tables.

use sqlx::PgPool;
use famifarm_core::types::DbId;

use crate::models::product::{ProductNameRow, ProductRow};

/// Column list for `products` queries.
const COLUMNS: &str = "id, facility, is_raw_material, is_end_product, is_active";

const NAME_COLUMNS: &str = "product_id, language, value";

pub struct ProductRepo;

impl ProductRepo {
    /// All products of a facility, ordered by id.
    pub async fn list_by_facility(
        pool: &PgPool,
        facility: &str,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE facility = $1 ORDER BY id");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(facility)
            .fetch_all(pool)
            .await
    }

    /// Name translations of the given products.
    pub async fn list_names(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<ProductNameRow>, sqlx::Error> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {NAME_COLUMNS} FROM product_names \
             WHERE product_id = ANY($1) \
             ORDER BY product_id, id"
        );
        sqlx::query_as::<_, ProductNameRow>(&query)
            .bind(product_ids)
            .fetch_all(pool)
            .await
    }
}
