//! PostgreSQL implementation of [`EventStore`].
//!
//! Rows from the repositories are assembled into domain [`Event`]s here:
//! harvests get their baskets, packings their package size and raw
//! material baskets.

use std::collections::HashMap;

use async_trait::async_trait;
use famifarm_core::error::ReportError;
use famifarm_core::event::{Event, EventPayload, EventType, HarvestBasket, PackingBasket};
use famifarm_core::facility::Facility;
use famifarm_core::product::{LocalizedValue, PackageSize, Product, ProductionLine};
use famifarm_core::reporting::store::EventStore;
use famifarm_core::types::{DbId, Timestamp};

use crate::models::event::{EventRow, HarvestBasketRow};
use crate::models::packing::{PackingBasketRow, PackingRow};
use crate::models::product::{ProductNameRow, ProductRow, ProductionLineRow};
use crate::repositories::{
    EventRepo, HarvestBasketRepo, PackingBasketRepo, PackingRepo, ProductRepo,
    ProductionLineRepo,
};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn list_packings(
        &self,
        facility: Facility,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Event>, ReportError> {
        let packings = PackingRepo::list_by_time_frame(&self.pool, facility.as_str(), from, to)
            .await
            .map_err(db_error)?;
        let ids: Vec<DbId> = packings.iter().map(|p| p.id).collect();
        let baskets = PackingBasketRepo::list_by_packings(&self.pool, &ids)
            .await
            .map_err(db_error)?;

        let mut by_packing: HashMap<DbId, Vec<PackingBasketRow>> = HashMap::new();
        for basket in baskets {
            by_packing.entry(basket.packing_id).or_default().push(basket);
        }

        packings
            .into_iter()
            .map(|row| {
                let baskets = by_packing.remove(&row.id).unwrap_or_default();
                packing_to_event(row, baskets)
            })
            .collect()
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list_events(
        &self,
        facility: Facility,
        event_type: EventType,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Event>, ReportError> {
        if event_type == EventType::Packing {
            return self.list_packings(facility, from, to).await;
        }

        let rows = EventRepo::list_by_time_frame_and_type(
            &self.pool,
            facility.as_str(),
            event_type.as_str(),
            from,
            to,
        )
        .await
        .map_err(db_error)?;

        let mut baskets: HashMap<DbId, Vec<HarvestBasketRow>> = HashMap::new();
        if event_type == EventType::Harvest {
            let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
            for basket in HarvestBasketRepo::list_by_events(&self.pool, &ids)
                .await
                .map_err(db_error)?
            {
                baskets.entry(basket.event_id).or_default().push(basket);
            }
        }

        let events = rows
            .into_iter()
            .map(|row| {
                let row_baskets = baskets.remove(&row.id).unwrap_or_default();
                row_to_event(row, row_baskets)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            facility = %facility,
            event_type = %event_type,
            count = events.len(),
            "Loaded events"
        );
        Ok(events)
    }

    async fn list_products(&self, facility: Facility) -> Result<Vec<Product>, ReportError> {
        let rows = ProductRepo::list_by_facility(&self.pool, facility.as_str())
            .await
            .map_err(db_error)?;
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let names = ProductRepo::list_names(&self.pool, &ids)
            .await
            .map_err(db_error)?;
        assemble_products(rows, names)
    }

    async fn list_production_lines(
        &self,
        facility: Facility,
    ) -> Result<Vec<ProductionLine>, ReportError> {
        ProductionLineRepo::list_by_facility(&self.pool, facility.as_str())
            .await
            .map_err(db_error)?
            .into_iter()
            .map(line_from_row)
            .collect()
    }

    async fn health_check(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}

fn db_error(err: sqlx::Error) -> ReportError {
    tracing::error!(error = %err, "Report query failed");
    ReportError::Generation(format!("database error: {err}"))
}

fn required<T>(value: Option<T>, id: DbId, column: &str) -> Result<T, ReportError> {
    value.ok_or_else(|| ReportError::Generation(format!("event {id} has no {column}")))
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn assemble_products(
    rows: Vec<ProductRow>,
    names: Vec<ProductNameRow>,
) -> Result<Vec<Product>, ReportError> {
    let mut by_product: HashMap<DbId, Vec<LocalizedValue>> = HashMap::new();
    for name in names {
        by_product
            .entry(name.product_id)
            .or_default()
            .push(LocalizedValue::new(name.language, name.value));
    }

    rows.into_iter()
        .map(|row| {
            Ok(Product {
                id: row.id,
                facility: row.facility.parse()?,
                name: by_product.remove(&row.id).unwrap_or_default(),
                is_raw_material: row.is_raw_material,
                is_end_product: row.is_end_product,
                is_active: row.is_active,
            })
        })
        .collect()
}

fn line_from_row(row: ProductionLineRow) -> Result<ProductionLine, ReportError> {
    Ok(ProductionLine {
        id: row.id,
        facility: row.facility.parse()?,
        line_number: row.line_number,
        default_gutter_hole_count: row.default_gutter_hole_count,
    })
}

fn row_to_event(row: EventRow, baskets: Vec<HarvestBasketRow>) -> Result<Event, ReportError> {
    let id = row.id;
    let event_type: EventType = row.event_type.parse()?;

    let payload = match event_type {
        EventType::Sowing => EventPayload::Sowing {
            production_line_id: row.production_line_id,
            amount: required(row.amount, id, "amount")?,
            pot_type: row.pot_type,
        },
        EventType::TableSpread => EventPayload::TableSpread {
            tray_count: required(row.tray_count, id, "tray_count")?,
        },
        EventType::Planting => EventPayload::Planting {
            production_line_id: required(row.production_line_id, id, "production_line_id")?,
            gutter_count: required(row.gutter_count, id, "gutter_count")?,
            gutter_hole_count: required(row.gutter_hole_count, id, "gutter_hole_count")?,
            sowing_date: required(row.sowing_date, id, "sowing_date")?,
            cell_count: row.cell_count.unwrap_or_default(),
            worker_count: row.worker_count.unwrap_or_default(),
        },
        EventType::Harvest => EventPayload::Harvest {
            production_line_id: required(row.production_line_id, id, "production_line_id")?,
            harvest_type: required(row.harvest_type, id, "harvest_type")?,
            gutter_count: required(row.gutter_count, id, "gutter_count")?,
            gutter_hole_count: row.gutter_hole_count,
            sowing_date: row.sowing_date,
            cutting_height: row.cutting_height,
            baskets: baskets
                .into_iter()
                .map(|b| HarvestBasket { weight_kg: b.weight_kg })
                .collect(),
        },
        EventType::Wastage => {
            let amount = required(row.amount, id, "amount")?;
            EventPayload::Wastage {
                production_line_id: row.production_line_id,
                phase: required(row.wastage_phase, id, "wastage_phase")?.parse()?,
                reason: required(row.wastage_reason, id, "wastage_reason")?,
                amount: i32::try_from(amount).map_err(|_| {
                    ReportError::Generation(format!("event {id} wastage amount out of range"))
                })?,
                additional_information: row.additional_information,
            }
        }
        EventType::CultivationObservation => EventPayload::CultivationObservation {
            weight: row.weight,
            luminance: row.luminance,
        },
        EventType::Packing => {
            return Err(ReportError::Generation(format!(
                "event {id} is a packing stored in the events table"
            )))
        }
    };

    let event = Event {
        id,
        facility: row.facility.parse()?,
        product_id: row.product_id,
        start_time: row.start_time,
        end_time: row.end_time,
        creator_id: row.creator_id,
        payload,
    };
    warn_if_inverted(&event);
    Ok(event)
}

fn packing_to_event(
    row: PackingRow,
    baskets: Vec<PackingBasketRow>,
) -> Result<Event, ReportError> {
    let event = Event {
        id: row.id,
        facility: row.facility.parse()?,
        product_id: row.product_id,
        start_time: row.start_time,
        end_time: row.end_time,
        creator_id: row.creator_id,
        payload: EventPayload::Packing {
            package_size: PackageSize {
                id: row.package_size_id,
                name: row.package_size_name,
                size: row.package_size,
            },
            packed_count: row.packed_count,
            baskets: baskets
                .into_iter()
                .map(|b| PackingBasket {
                    product_id: b.product_id,
                    count: b.count,
                })
                .collect(),
        },
    };
    warn_if_inverted(&event);
    Ok(event)
}

/// Inverted spans still count by absolute duration; flag them for cleanup.
fn warn_if_inverted(event: &Event) {
    if let Err(err) = event.validate() {
        tracing::warn!(event_id = event.id, error = %err, "Event time span is inverted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn row(event_type: &str) -> EventRow {
        EventRow {
            id: 7,
            facility: "JUVA".into(),
            event_type: event_type.into(),
            product_id: 1,
            start_time: Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap(),
            end_time: None,
            creator_id: Uuid::nil(),
            production_line_id: Some(2),
            amount: None,
            pot_type: None,
            tray_count: None,
            gutter_count: None,
            gutter_hole_count: None,
            sowing_date: None,
            cell_count: None,
            worker_count: None,
            harvest_type: None,
            cutting_height: None,
            wastage_phase: None,
            wastage_reason: None,
            additional_information: None,
            weight: None,
            luminance: None,
        }
    }

    #[test]
    fn harvest_row_collects_baskets() {
        let mut harvest = row("HARVEST");
        harvest.harvest_type = Some("BOXING".into());
        harvest.gutter_count = Some(12);
        let baskets = vec![
            HarvestBasketRow { id: 1, event_id: 7, weight_kg: 4.5 },
            HarvestBasketRow { id: 2, event_id: 7, weight_kg: 5.0 },
        ];

        let event = row_to_event(harvest, baskets).unwrap();
        assert_eq!(event.facility, Facility::Juva);
        match event.payload {
            EventPayload::Harvest { gutter_count, baskets, .. } => {
                assert_eq!(gutter_count, 12);
                assert_eq!(baskets.len(), 2);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn missing_subtype_column_fails() {
        let err = row_to_event(row("SOWING"), vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Report generation failed: event 7 has no amount");
    }

    #[test]
    fn wastage_phase_is_parsed() {
        let mut wastage = row("WASTAGE");
        wastage.amount = Some(3);
        wastage.wastage_phase = Some("PLANTING".into());
        wastage.wastage_reason = Some("Dried".into());

        let event = row_to_event(wastage, vec![]).unwrap();
        assert_eq!(
            event.payload,
            EventPayload::Wastage {
                production_line_id: Some(2),
                phase: EventType::Planting,
                reason: "Dried".into(),
                amount: 3,
                additional_information: None,
            }
        );
    }

    #[test]
    fn products_get_their_names() {
        let rows = vec![ProductRow {
            id: 1,
            facility: "JUVA".into(),
            is_raw_material: true,
            is_end_product: false,
            is_active: true,
        }];
        let names = vec![
            ProductNameRow { product_id: 1, language: "fi".into(), value: "Rucola".into() },
            ProductNameRow { product_id: 2, language: "fi".into(), value: "Other".into() },
        ];

        let products = assemble_products(rows, names).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, vec![LocalizedValue::new("fi", "Rucola")]);
    }
}
