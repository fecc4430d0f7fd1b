//! Read side the reports are generated from.
//!
//! [`EventStore`] is implemented over PostgreSQL in `famifarm-db`;
//! [`InMemoryEventStore`] backs tests and local tooling.

use async_trait::async_trait;

use crate::error::ReportError;
use crate::event::{Event, EventType};
use crate::facility::Facility;
use crate::product::{Product, ProductionLine};
use crate::types::Timestamp;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events of one type in a facility whose start time lies in
    /// `[from, to]`, with subtype details loaded.
    async fn list_events(
        &self,
        facility: Facility,
        event_type: EventType,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Event>, ReportError>;

    async fn list_products(&self, facility: Facility) -> Result<Vec<Product>, ReportError>;

    async fn list_production_lines(
        &self,
        facility: Facility,
    ) -> Result<Vec<ProductionLine>, ReportError>;

    /// Whether the backing storage is reachable.
    async fn health_check(&self) -> bool;
}

/// Fixed in-memory data set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: Vec<Event>,
    products: Vec<Product>,
    lines: Vec<ProductionLine>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_line(mut self, line: ProductionLine) -> Self {
        self.lines.push(line);
        self
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list_events(
        &self,
        facility: Facility,
        event_type: EventType,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Event>, ReportError> {
        Ok(self
            .events
            .iter()
            .filter(|e| {
                e.facility == facility
                    && e.event_type() == event_type
                    && e.start_time >= from
                    && e.start_time <= to
            })
            .cloned()
            .collect())
    }

    async fn list_products(&self, facility: Facility) -> Result<Vec<Product>, ReportError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.facility == facility)
            .cloned()
            .collect())
    }

    async fn list_production_lines(
        &self,
        facility: Facility,
    ) -> Result<Vec<ProductionLine>, ReportError> {
        Ok(self
            .lines
            .iter()
            .filter(|l| l.facility == facility)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventPayload;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sowing(id: i64, facility: Facility, day: u32) -> Event {
        Event {
            id,
            facility,
            product_id: 1,
            start_time: Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap(),
            end_time: None,
            creator_id: Uuid::nil(),
            payload: EventPayload::Sowing {
                production_line_id: None,
                amount: 10,
                pot_type: None,
            },
        }
    }

    #[tokio::test]
    async fn filters_by_facility_type_and_inclusive_window() {
        let store = InMemoryEventStore::new()
            .with_event(sowing(1, Facility::Juva, 1))
            .with_event(sowing(2, Facility::Juva, 10))
            .with_event(sowing(3, Facility::Juva, 11))
            .with_event(sowing(4, Facility::Joroinen, 5));

        let from = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap();

        let ids: Vec<i64> = store
            .list_events(Facility::Juva, EventType::Sowing, from, to)
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let harvests = store
            .list_events(Facility::Juva, EventType::Harvest, from, to)
            .await
            .unwrap();
        assert!(harvests.is_empty());
    }
}
