//! Repository for the `events` table.

use sqlx::PgPool;
use famifarm_core::types::Timestamp;

use crate::models::event::EventRow;

/// Column list for `events` SELECT queries.
const COLUMNS: &str = "\
    id, facility, event_type, product_id, start_time, end_time, creator_id, \
    production_line_id, amount, pot_type, tray_count, \
    gutter_count, gutter_hole_count, sowing_date, cell_count, worker_count, \
    harvest_type, cutting_height, \
    wastage_phase, wastage_reason, additional_information, \
    weight, luminance";

pub struct EventRepo;

impl EventRepo {
    /// Events of one type whose start time lies in `[from, to]`, oldest first.
    pub async fn list_by_time_frame_and_type(
        pool: &PgPool,
        facility: &str,
        event_type: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<EventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE facility = $1 AND event_type = $2 \
               AND start_time >= $3 AND start_time <= $4 \
             ORDER BY start_time, id"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(facility)
            .bind(event_type)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
