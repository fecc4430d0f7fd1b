//! Plant unit counts per cultivation phase.
//!
//! Sowings and table spreads are recorded in trays and converted to plants
//! by tray size; plantings and harvests are gutters times gutter holes;
//! packings are packages times package size.

use std::collections::HashMap;

use crate::error::ReportError;
use crate::event::{Event, EventPayload, EventType};
use crate::facility::Facility;
use crate::product::Catalog;
use crate::types::DbId;

/// Plants per tray in large pots.
pub const LARGE_POT_TRAY_SIZE: i64 = 35;
/// Plants per tray in other pots at Juva.
pub const JUVA_TRAY_SIZE: i64 = 50;
/// Plants per tray in other pots elsewhere.
pub const DEFAULT_TRAY_SIZE: i64 = 54;

pub fn tray_size(facility: Facility, pot_type: Option<&str>) -> i64 {
    match pot_type {
        Some(pot) if pot.eq_ignore_ascii_case("LARGE") => LARGE_POT_TRAY_SIZE,
        _ if facility == Facility::Juva => JUVA_TRAY_SIZE,
        _ => DEFAULT_TRAY_SIZE,
    }
}

/// Converts events into plant units.
///
/// Table spreads borrow the pot type of the product's earliest sowing.
/// Harvests without a gutter hole count take it from the latest planting
/// of the same product on the same line, then from the line default. Both
/// lookups only see the events passed to [`UnitCounter::new`].
pub struct UnitCounter<'a> {
    catalog: &'a Catalog,
    first_sowings: HashMap<DbId, &'a Event>,
    /// Chronological.
    plantings: Vec<&'a Event>,
}

impl<'a> UnitCounter<'a> {
    pub fn new(events: &'a [Event], catalog: &'a Catalog) -> Self {
        let mut first_sowings: HashMap<DbId, &'a Event> = HashMap::new();
        let mut plantings = Vec::new();

        for event in events {
            match event.event_type() {
                EventType::Sowing => {
                    let first = first_sowings.entry(event.product_id).or_insert(event);
                    if (event.start_time, event.id) < (first.start_time, first.id) {
                        *first = event;
                    }
                }
                EventType::Planting => plantings.push(event),
                _ => {}
            }
        }
        plantings.sort_by_key(|e| (e.start_time, e.id));

        Self {
            catalog,
            first_sowings,
            plantings,
        }
    }

    /// Earliest sowing of `product_id`.
    pub fn first_sowing(&self, product_id: DbId) -> Option<&'a Event> {
        self.first_sowings.get(&product_id).copied()
    }

    /// Plants per tray of `product_id` going by its earliest sowing, or
    /// zero when it has none.
    pub fn product_tray_size(&self, product_id: DbId) -> i64 {
        match self.first_sowing(product_id) {
            Some(sowing) => {
                let pot_type = match &sowing.payload {
                    EventPayload::Sowing { pot_type, .. } => pot_type.as_deref(),
                    _ => None,
                };
                tray_size(sowing.facility, pot_type)
            }
            None => 0,
        }
    }

    /// Plant units one event stands for.
    pub fn units(&self, event: &Event) -> Result<i64, ReportError> {
        let units = match &event.payload {
            EventPayload::Sowing {
                amount, pot_type, ..
            } => amount * tray_size(event.facility, pot_type.as_deref()),
            EventPayload::TableSpread { tray_count } => {
                i64::from(*tray_count) * self.product_tray_size(event.product_id)
            }
            EventPayload::Planting {
                gutter_count,
                gutter_hole_count,
                ..
            } => i64::from(*gutter_count) * i64::from(*gutter_hole_count),
            EventPayload::Harvest {
                production_line_id,
                gutter_count,
                gutter_hole_count,
                ..
            } => {
                let holes = match gutter_hole_count {
                    Some(holes) if *holes > 0 => i64::from(*holes),
                    _ => self.guess_gutter_holes(event, *production_line_id)?,
                };
                i64::from(*gutter_count) * holes
            }
            EventPayload::Packing {
                package_size,
                packed_count,
                ..
            } => i64::from(*packed_count) * i64::from(package_size.size),
            EventPayload::Wastage { amount, .. } => i64::from(*amount),
            EventPayload::CultivationObservation { .. } => 0,
        };
        Ok(units)
    }

    fn guess_gutter_holes(&self, harvest: &Event, line_id: DbId) -> Result<i64, ReportError> {
        let latest_planting = self.plantings.iter().rev().find_map(|p| match &p.payload {
            EventPayload::Planting {
                production_line_id,
                gutter_hole_count,
                ..
            } if p.product_id == harvest.product_id
                && *production_line_id == line_id
                && p.start_time <= harvest.start_time =>
            {
                Some(*gutter_hole_count)
            }
            _ => None,
        });

        let holes = match latest_planting {
            Some(holes) => holes,
            None => self
                .catalog
                .line(line_id)?
                .default_gutter_hole_count
                .unwrap_or(0),
        };
        Ok(i64::from(holes))
    }
}

/// Plant units per phase for one product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseUnits {
    units: HashMap<EventType, i64>,
    pub harvested_baskets: i64,
}

impl PhaseUnits {
    pub fn get(&self, phase: EventType) -> i64 {
        self.units.get(&phase).copied().unwrap_or(0)
    }

    /// Whether any event of `phase` was counted.
    pub fn has(&self, phase: EventType) -> bool {
        self.units.contains_key(&phase)
    }
}

/// Sum plant units per product and phase.
pub fn tally(
    events: &[Event],
    counter: &UnitCounter<'_>,
) -> Result<HashMap<DbId, PhaseUnits>, ReportError> {
    let mut rows: HashMap<DbId, PhaseUnits> = HashMap::new();
    for event in events {
        let units = counter.units(event)?;
        let row = rows.entry(event.product_id).or_default();
        *row.units.entry(event.event_type()).or_default() += units;
        if let EventPayload::Harvest { baskets, .. } = &event.payload {
            row.harvested_baskets += baskets.len() as i64;
        }
    }
    Ok(rows)
}
