//! Repository for the `packings` table.

use sqlx::PgPool;
use famifarm_core::types::Timestamp;

use crate::models::packing::PackingRow;

/// Packing columns joined with the package size (`p` and `ps` aliases).
const COLUMNS: &str = "\
    p.id, p.facility, p.product_id, p.packed_count, \
    p.start_time, p.end_time, p.creator_id, \
    ps.id AS package_size_id, ps.name AS package_size_name, ps.size AS package_size";

pub struct PackingRepo;

impl PackingRepo {
    /// Packings whose start time lies in `[from, to]`, oldest first.
    pub async fn list_by_time_frame(
        pool: &PgPool,
        facility: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<PackingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM packings p \
             JOIN package_sizes ps ON ps.id = p.package_size_id \
             WHERE p.facility = $1 AND p.start_time >= $2 AND p.start_time <= $3 \
             ORDER BY p.start_time, p.id"
        );
        sqlx::query_as::<_, PackingRow>(&query)
            .bind(facility)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
