//! Cultivation outcome reports, one row per product: harvest yield,
//! planting yield and growth time.

use std::collections::HashMap;

use super::layout::{write_preamble, write_row, ReportContext, FIRST_DATA_ROW};
use super::rates::Ratio;
use super::sheet::{CellValue, TableWriter};
use super::units::UnitCounter;
use crate::error::ReportError;
use crate::event::{Event, EventPayload, EventType};
use crate::locale::Label;
use crate::types::{DbId, Timestamp};

const YIELD_HEADERS: &[Label] = &[
    Label::Line,
    Label::Product,
    Label::HarvestDate,
    Label::HarvestedUnits,
    Label::Boxes,
    Label::YieldPercentage,
];

const PLANTING_YIELD_HEADERS: &[Label] = &[
    Label::Line,
    Label::Product,
    Label::PlantingDate,
    Label::UnitsInGutters,
    Label::UnitsFromCells,
    Label::YieldPercentage,
];

const GROWTH_TIME_HEADERS: &[Label] = &[
    Label::Line,
    Label::Product,
    Label::PackingDate,
    Label::SowingDate,
    Label::AverageWeight,
    Label::GrowthDays,
];

/// Events of one product, split by type and kept in start-time order.
#[derive(Default)]
struct ProductEvents<'a> {
    by_type: HashMap<EventType, Vec<&'a Event>>,
}

impl<'a> ProductEvents<'a> {
    fn of(&self, event_type: EventType) -> &[&'a Event] {
        self.by_type
            .get(&event_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Latest end time among events of `event_type`.
    fn last_end(&self, event_type: EventType) -> Option<Timestamp> {
        self.of(event_type).iter().filter_map(|e| e.end_time).max()
    }
}

fn group_by_product(events: &[Event]) -> HashMap<DbId, ProductEvents<'_>> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| (e.start_time, e.id));

    let mut groups: HashMap<DbId, ProductEvents<'_>> = HashMap::new();
    for event in sorted {
        groups
            .entry(event.product_id)
            .or_default()
            .by_type
            .entry(event.event_type())
            .or_default()
            .push(event);
    }
    groups
}

/// Products having at least one event of `event_type`, by localized name.
fn products_with(
    ctx: &ReportContext<'_>,
    groups: &HashMap<DbId, ProductEvents<'_>>,
    event_type: EventType,
) -> Vec<DbId> {
    let mut ids: Vec<DbId> = groups
        .iter()
        .filter(|(_, group)| !group.of(event_type).is_empty())
        .map(|(id, _)| *id)
        .collect();
    ctx.catalog.sort_by_name(&mut ids, ctx.locale);
    ids
}

/// Line number of the first event that records one.
fn first_line(
    ctx: &ReportContext<'_>,
    events: &[&Event],
) -> Result<Option<String>, ReportError> {
    match events.iter().find_map(|e| e.production_line_id()) {
        Some(id) => Ok(Some(ctx.catalog.line_number(id)?.to_string())),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Harvest yield
// ---------------------------------------------------------------------------

/// Packed boxes relative to harvested plant units.
pub fn write_yield<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::YieldTitle, YIELD_HEADERS);

    let counter = UnitCounter::new(events, ctx.catalog);
    let groups = group_by_product(events);

    let mut row_index = FIRST_DATA_ROW;
    for product_id in products_with(ctx, &groups, EventType::Harvest) {
        let group = &groups[&product_id];
        let harvests = group.of(EventType::Harvest);

        let mut harvested = 0;
        for harvest in harvests {
            harvested += counter.units(harvest)?;
        }
        let boxes: i64 = group
            .of(EventType::Packing)
            .iter()
            .map(|e| match &e.payload {
                EventPayload::Packing { packed_count, .. } => i64::from(*packed_count),
                _ => 0,
            })
            .sum();

        let cells = vec![
            first_line(ctx, harvests)?.into(),
            ctx.catalog.product_name(product_id, ctx.locale)?.into(),
            group.last_end(EventType::Harvest).map(|t| ctx.date(t)).into(),
            harvested.into(),
            boxes.into(),
            Ratio::of(boxes as f64, harvested as f64).percent().into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Planting yield
// ---------------------------------------------------------------------------

/// Plants placed in gutters relative to plants taken from sowing cells.
pub fn write_planting_yield<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::PlantingYieldTitle, PLANTING_YIELD_HEADERS);

    let counter = UnitCounter::new(events, ctx.catalog);
    let groups = group_by_product(events);

    let mut row_index = FIRST_DATA_ROW;
    for product_id in products_with(ctx, &groups, EventType::Planting) {
        let group = &groups[&product_id];
        let plantings = group.of(EventType::Planting);
        let tray_size = counter.product_tray_size(product_id);

        let mut in_gutters = 0;
        let mut from_cells = 0;
        for planting in plantings {
            in_gutters += counter.units(planting)?;
            if let EventPayload::Planting { cell_count, .. } = &planting.payload {
                from_cells += i64::from(*cell_count) * tray_size;
            }
        }

        let cells = vec![
            first_line(ctx, plantings)?.into(),
            ctx.catalog.product_name(product_id, ctx.locale)?.into(),
            group.last_end(EventType::Planting).map(|t| ctx.date(t)).into(),
            in_gutters.into(),
            from_cells.into(),
            Ratio::of(in_gutters as f64, from_cells as f64).percent().into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Growth time
// ---------------------------------------------------------------------------

/// Days from the first sowing to the last packing, with the average
/// observed plant weight. Products missing a sowing, a packing or a
/// weighed observation are left out.
pub fn write_growth_time<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::GrowthTimeTitle, GROWTH_TIME_HEADERS);

    let groups = group_by_product(events);

    let mut row_index = FIRST_DATA_ROW;
    for product_id in products_with(ctx, &groups, EventType::Sowing) {
        let group = &groups[&product_id];
        let Some(first_sowing) = group.of(EventType::Sowing).first() else {
            continue;
        };
        let Some(packed_at) = group
            .of(EventType::Packing)
            .iter()
            .map(|e| e.end_time.unwrap_or(e.start_time))
            .max()
        else {
            continue;
        };
        let weights: Vec<f64> = group
            .of(EventType::CultivationObservation)
            .iter()
            .filter_map(|e| match &e.payload {
                EventPayload::CultivationObservation { weight, .. } => *weight,
                _ => None,
            })
            .collect();
        let total_weight: f64 = weights.iter().sum();
        if total_weight <= 0.0 {
            continue;
        }

        let sowed_at = first_sowing.start_time;
        let cells = vec![
            first_line(ctx, &[*first_sowing])?.into(),
            ctx.catalog.product_name(product_id, ctx.locale)?.into(),
            ctx.date(packed_at).into(),
            ctx.date(sowed_at).into(),
            (total_weight / weights.len() as f64).into(),
            (packed_at - sowed_at).num_days().into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::HarvestBasket;
    use crate::facility::Facility;
    use crate::locale::Locale;
    use crate::product::{Catalog, LocalizedValue, PackageSize, Product, ProductionLine};
    use crate::reporting::sheet::Sheet;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};
    use uuid::Uuid;

    fn catalog() -> Catalog {
        let product = |id, en: &str| Product {
            id,
            facility: Facility::Juva,
            name: vec![LocalizedValue::new("en", en)],
            is_raw_material: false,
            is_end_product: true,
            is_active: true,
        };
        let line = |id, number: &str| ProductionLine {
            id,
            facility: Facility::Juva,
            line_number: number.into(),
            default_gutter_hole_count: Some(20),
        };
        Catalog::new(
            vec![product(1, "Rucola"), product(2, "Basil")],
            vec![line(1, "A-1"), line(2, "B-2")],
        )
    }

    fn event(id: DbId, product_id: DbId, day: u32, payload: EventPayload) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap();
        Event {
            id,
            facility: Facility::Juva,
            product_id,
            start_time: start,
            end_time: Some(start + Duration::hours(1)),
            creator_id: Uuid::nil(),
            payload,
        }
    }

    fn sowing(id: DbId, product_id: DbId, day: u32, line: Option<DbId>) -> Event {
        event(
            id,
            product_id,
            day,
            EventPayload::Sowing {
                production_line_id: line,
                amount: 10,
                pot_type: Some("LARGE".into()),
            },
        )
    }

    fn planting(id: DbId, product_id: DbId, day: u32, line: DbId) -> Event {
        event(
            id,
            product_id,
            day,
            EventPayload::Planting {
                production_line_id: line,
                gutter_count: 5,
                gutter_hole_count: 14,
                sowing_date: Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap(),
                cell_count: 4,
                worker_count: 2,
            },
        )
    }

    fn harvest(id: DbId, product_id: DbId, day: u32, line: DbId) -> Event {
        event(
            id,
            product_id,
            day,
            EventPayload::Harvest {
                production_line_id: line,
                harvest_type: "BOXING".into(),
                gutter_count: 10,
                gutter_hole_count: Some(20),
                sowing_date: None,
                cutting_height: None,
                baskets: vec![HarvestBasket { weight_kg: 10.0 }],
            },
        )
    }

    fn packing(id: DbId, product_id: DbId, day: u32, packed_count: i32) -> Event {
        event(
            id,
            product_id,
            day,
            EventPayload::Packing {
                package_size: PackageSize {
                    id: 1,
                    name: "100 g".into(),
                    size: 100,
                },
                packed_count,
                baskets: vec![],
            },
        )
    }

    fn observation(id: DbId, product_id: DbId, day: u32, weight: Option<f64>) -> Event {
        event(
            id,
            product_id,
            day,
            EventPayload::CultivationObservation {
                weight,
                luminance: None,
            },
        )
    }

    fn render(
        f: impl FnOnce(&mut Sheet, &ReportContext<'_>) -> Result<(), ReportError>,
    ) -> Sheet {
        let catalog = catalog();
        let ctx = ReportContext {
            locale: Locale::En,
            from: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap(),
            offset: FixedOffset::east_opt(0).unwrap(),
            catalog: &catalog,
        };
        let mut sheet = Sheet::new("t");
        f(&mut sheet, &ctx).unwrap();
        sheet
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn yield_relates_boxes_to_harvested_units() {
        let events = vec![
            harvest(1, 1, 4, 2),
            harvest(2, 1, 9, 1),
            packing(3, 1, 10, 50),
            packing(4, 2, 10, 7),
        ];
        let sheet = render(|s, ctx| write_yield(s, ctx, &events));

        assert_eq!(sheet.get(0, 0), Some(&text("Yield")));
        assert_eq!(sheet.get(4, 0), Some(&text("B-2")));
        assert_eq!(sheet.get(4, 1), Some(&text("Rucola")));
        assert_eq!(sheet.get(4, 2), Some(&text("09.06.2024")));
        assert_eq!(sheet.get(4, 3), Some(&CellValue::Integer(400)));
        assert_eq!(sheet.get(4, 4), Some(&CellValue::Integer(50)));
        assert_eq!(sheet.get(4, 5), Some(&text("12.50%")));
        // Basil was packed but never harvested.
        assert_eq!(sheet.get(5, 1), None);
    }

    #[test]
    fn planting_yield_uses_tray_size_of_first_sowing() {
        let events = vec![
            sowing(1, 1, 1, None),
            planting(2, 1, 5, 1),
            planting(3, 1, 7, 1),
            planting(4, 2, 6, 2),
        ];
        let sheet = render(|s, ctx| write_planting_yield(s, ctx, &events));

        assert_eq!(sheet.get(4, 1), Some(&text("Basil")));
        assert_eq!(sheet.get(4, 3), Some(&CellValue::Integer(70)));
        assert_eq!(sheet.get(4, 4), Some(&CellValue::Integer(0)));
        assert_eq!(sheet.get(4, 5), None);

        assert_eq!(sheet.get(5, 0), Some(&text("A-1")));
        assert_eq!(sheet.get(5, 2), Some(&text("07.06.2024")));
        assert_eq!(sheet.get(5, 3), Some(&CellValue::Integer(140)));
        assert_eq!(sheet.get(5, 4), Some(&CellValue::Integer(280)));
        assert_eq!(sheet.get(5, 5), Some(&text("50.00%")));
    }

    #[test]
    fn growth_time_needs_sowing_packing_and_weight() {
        let events = vec![
            sowing(1, 1, 2, Some(1)),
            sowing(2, 1, 4, Some(2)),
            observation(3, 1, 10, Some(30.0)),
            observation(4, 1, 12, Some(50.0)),
            observation(5, 1, 13, None),
            packing(6, 1, 20, 5),
            packing(7, 1, 16, 5),
            sowing(8, 2, 2, None),
            packing(9, 2, 20, 5),
        ];
        let sheet = render(|s, ctx| write_growth_time(s, ctx, &events));

        assert_eq!(sheet.get(4, 0), Some(&text("A-1")));
        assert_eq!(sheet.get(4, 1), Some(&text("Rucola")));
        assert_eq!(sheet.get(4, 2), Some(&text("20.06.2024")));
        assert_eq!(sheet.get(4, 3), Some(&text("02.06.2024")));
        assert_eq!(sheet.get(4, 4), Some(&CellValue::Number(40.0)));
        assert_eq!(sheet.get(4, 5), Some(&CellValue::Integer(18)));
        assert_eq!(sheet.row_count(), 5);
    }
}
