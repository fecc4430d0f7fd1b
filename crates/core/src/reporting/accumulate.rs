//! Per-product running totals folded over an event list.

use std::collections::HashMap;
use std::hash::Hash;

use crate::event::{Event, EventPayload};

/// Units (seedlings, gutter holes) that fit on one cart.
pub const CART_CAPACITY: f64 = 32.0;

/// Whether event timestamps take part in the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulationMode {
    /// Timestamps are ignored; every event counts.
    Totals,
    /// Only events with both a start and an end time count, and their
    /// durations are summed.
    WorkHours,
}

/// Running sums for one aggregation key.
///
/// Each report reads only the fields relevant to its columns; the others
/// stay at zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationRow {
    /// Sown units, or gutters for planting and harvest.
    pub amount: i64,
    pub carts: f64,
    pub duration_minutes: i64,
    pub yield_kg: f64,
    pub basket_count: i64,
    pub wastage_amount: i64,
    /// Packages (boxes) packed.
    pub packing_amount: i64,
    /// Bags packed: packages times package size.
    pub packed_units: i64,
    pub event_count: i64,
}

impl AggregationRow {
    /// Add one event's contribution to the row.
    ///
    /// Returns `false` without touching the row when the event is skipped
    /// (work-hour mode and no end time).
    pub fn absorb(&mut self, event: &Event, mode: AccumulationMode) -> bool {
        if mode == AccumulationMode::WorkHours {
            match event.duration_minutes() {
                Some(minutes) => self.duration_minutes += minutes,
                None => return false,
            }
        }

        match &event.payload {
            EventPayload::Sowing { amount, .. } => {
                self.amount += amount;
                self.carts += *amount as f64 / CART_CAPACITY;
            }
            EventPayload::Planting {
                gutter_count,
                gutter_hole_count,
                ..
            } => {
                self.amount += i64::from(*gutter_count);
                self.carts += planted_carts(*gutter_count, *gutter_hole_count);
            }
            EventPayload::Harvest {
                gutter_count,
                baskets,
                ..
            } => {
                self.amount += i64::from(*gutter_count);
                self.yield_kg += baskets.iter().map(|b| b.weight_kg).sum::<f64>();
                self.basket_count += baskets.len() as i64;
            }
            EventPayload::Packing {
                package_size,
                packed_count,
                ..
            } => {
                self.packing_amount += i64::from(*packed_count);
                self.packed_units += i64::from(*packed_count) * i64::from(package_size.size);
            }
            EventPayload::Wastage { amount, .. } => {
                self.wastage_amount += i64::from(*amount);
            }
            EventPayload::TableSpread { .. } | EventPayload::CultivationObservation { .. } => {}
        }

        self.event_count += 1;
        true
    }

    /// Add another row's sums into this one.
    pub fn merge(&mut self, other: &AggregationRow) {
        self.amount += other.amount;
        self.carts += other.carts;
        self.duration_minutes += other.duration_minutes;
        self.yield_kg += other.yield_kg;
        self.basket_count += other.basket_count;
        self.wastage_amount += other.wastage_amount;
        self.packing_amount += other.packing_amount;
        self.packed_units += other.packed_units;
        self.event_count += other.event_count;
    }
}

/// Carts needed for a planting of `gutter_count` gutters.
pub fn planted_carts(gutter_count: i32, gutter_hole_count: i32) -> f64 {
    f64::from(gutter_count) * f64::from(gutter_hole_count) / CART_CAPACITY
}

/// Fold `events` into one [`AggregationRow`] per key.
///
/// The fold is commutative: the same events in any order produce the same
/// map. Keys with no absorbed event are absent.
pub fn accumulate<K, F>(events: &[Event], key: F, mode: AccumulationMode) -> HashMap<K, AggregationRow>
where
    K: Eq + Hash,
    F: Fn(&Event) -> K,
{
    let mut rows: HashMap<K, AggregationRow> = HashMap::new();
    for event in events {
        if mode == AccumulationMode::WorkHours && event.end_time.is_none() {
            continue;
        }
        rows.entry(key(event)).or_default().absorb(event, mode);
    }
    rows
}

/// Sum of all rows, used for totals and combined lines.
pub fn totals<'a>(rows: impl IntoIterator<Item = &'a AggregationRow>) -> AggregationRow {
    let mut total = AggregationRow::default();
    for row in rows {
        total.merge(row);
    }
    total
}
