//! List reports: one row per event with its resolved details, no totals.

use indexmap::IndexMap;

use super::accumulate::planted_carts;
use super::layout::{write_preamble, write_row, ReportContext, FIRST_DATA_ROW, HEADER_ROW};
use super::rates::Ratio;
use super::sheet::{CellValue, TableWriter};
use crate::error::ReportError;
use crate::event::{Event, EventPayload};
use crate::locale::Label;
use crate::types::{DbId, Timestamp};

/// Divisor turning kg per gutter hole into kg per sold unit.
pub const UNITS_PER_GUTTER_HOLE: f64 = 50.0;

const GRAMS_PER_KG: f64 = 1000.0;

const PLANTING_HEADERS: &[Label] = &[
    Label::Product,
    Label::Line,
    Label::PlantingDate,
    Label::SowingDate,
    Label::SaplingDays,
    Label::GutterCount,
    Label::CartCount,
];

const HARVEST_HEADERS: &[Label] = &[
    Label::Product,
    Label::Line,
    Label::HarvestDate,
    Label::SowingDate,
    Label::GrowthDays,
    Label::TableCount,
    Label::YieldKg,
    Label::BasketCount,
    Label::KgPerTable,
    Label::GramsPerUnit,
    Label::KgPerBasket,
    Label::CuttingHeight,
];

const PACKING_HEADERS: &[Label] = &[Label::Product, Label::PackingDate, Label::Bags, Label::Boxes];

const SEEDLING_TIME_HEADERS: &[Label] = &[
    Label::Line,
    Label::Product,
    Label::PlantingDate,
    Label::SowingDate,
    Label::SaplingDays,
];

const WASTAGE_HEADERS: &[Label] = &[
    Label::WastageDate,
    Label::Line,
    Label::Worker,
    Label::Product,
    Label::Phase,
    Label::WastageReason,
    Label::AdditionalInformation,
    Label::Amount,
];

/// Events in the order list reports print them.
fn chronological(events: &[Event]) -> Vec<&Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| (e.start_time, e.id));
    sorted
}

fn days_between(a: Timestamp, b: Timestamp) -> i64 {
    (a - b).num_days().abs()
}

fn ratio_cell(ratio: Ratio) -> CellValue {
    ratio.value().into()
}

// ---------------------------------------------------------------------------
// Planting
// ---------------------------------------------------------------------------

pub fn write_planting_list<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::PlantingListTitle, PLANTING_HEADERS);

    let mut row_index = FIRST_DATA_ROW;
    for event in chronological(events) {
        let EventPayload::Planting {
            production_line_id,
            gutter_count,
            gutter_hole_count,
            sowing_date,
            ..
        } = &event.payload
        else {
            continue;
        };

        let cells = vec![
            ctx.catalog.product_name(event.product_id, ctx.locale)?.into(),
            ctx.catalog.line_number(*production_line_id)?.into(),
            ctx.date(event.start_time).into(),
            ctx.date(*sowing_date).into(),
            days_between(event.start_time, *sowing_date).into(),
            (*gutter_count).into(),
            planted_carts(*gutter_count, *gutter_hole_count).into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Harvest
// ---------------------------------------------------------------------------

pub fn write_harvest_list<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::HarvestListTitle, HARVEST_HEADERS);

    let mut row_index = FIRST_DATA_ROW;
    for event in chronological(events) {
        let EventPayload::Harvest {
            production_line_id,
            gutter_count,
            gutter_hole_count,
            sowing_date,
            cutting_height,
            baskets,
            ..
        } = &event.payload
        else {
            continue;
        };

        let yield_kg: f64 = baskets.iter().map(|b| b.weight_kg).sum();
        let gutters = f64::from(*gutter_count);
        let kg_per_table = Ratio::of(yield_kg, gutters);
        let grams_per_unit = match gutter_hole_count {
            Some(holes) => Ratio::of(
                yield_kg * GRAMS_PER_KG,
                gutters * f64::from(*holes) * UNITS_PER_GUTTER_HOLE,
            ),
            None => Ratio::Undefined,
        };
        let kg_per_basket = Ratio::of(yield_kg, baskets.len() as f64);

        let cells = vec![
            ctx.catalog.product_name(event.product_id, ctx.locale)?.into(),
            ctx.catalog.line_number(*production_line_id)?.into(),
            ctx.date(event.start_time).into(),
            sowing_date.map(|s| ctx.date(s)).into(),
            sowing_date.map(|s| days_between(event.start_time, s)).into(),
            (*gutter_count).into(),
            yield_kg.into(),
            (baskets.len() as i64).into(),
            ratio_cell(kg_per_table),
            ratio_cell(grams_per_unit),
            ratio_cell(kg_per_basket),
            (*cutting_height).into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

/// Packing rows with one column per raw material consumed in the window,
/// in order of first use, followed by a raw material total column.
pub fn write_packing_list<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::PackingListTitle, PACKING_HEADERS);

    let first_dynamic = PACKING_HEADERS.len() as u32;
    let packings = chronological(events);

    // Raw material product -> column offset.
    let mut material_columns: IndexMap<DbId, u32> = IndexMap::new();
    for event in &packings {
        if let EventPayload::Packing { baskets, .. } = &event.payload {
            for basket in baskets {
                if ctx.catalog.product(basket.product_id)?.is_raw_material
                    && !material_columns.contains_key(&basket.product_id)
                {
                    let offset = material_columns.len() as u32;
                    material_columns.insert(basket.product_id, offset);
                }
            }
        }
    }

    for (product_id, offset) in &material_columns {
        let name = ctx.catalog.product_name(*product_id, ctx.locale)?;
        writer.set_cell(HEADER_ROW, first_dynamic + offset, name.into());
    }
    let total_column = first_dynamic + material_columns.len() as u32;
    writer.set_cell(
        HEADER_ROW,
        total_column,
        ctx.text(Label::TotalRawMaterials).into(),
    );

    let mut row_index = FIRST_DATA_ROW;
    for event in packings {
        let EventPayload::Packing {
            package_size,
            packed_count,
            baskets,
        } = &event.payload
        else {
            continue;
        };

        let packed = i64::from(*packed_count);
        let cells = vec![
            ctx.catalog.product_name(event.product_id, ctx.locale)?.into(),
            ctx.date(event.start_time).into(),
            (packed * i64::from(package_size.size)).into(),
            packed.into(),
        ];
        write_row(writer, row_index, cells);

        let mut used: IndexMap<DbId, i64> = IndexMap::new();
        for basket in baskets {
            if material_columns.contains_key(&basket.product_id) {
                *used.entry(basket.product_id).or_default() += i64::from(basket.count);
            }
        }
        for (product_id, count) in &used {
            let offset = material_columns[product_id];
            writer.set_cell(row_index, first_dynamic + offset, (*count).into());
        }
        writer.set_cell(row_index, total_column, used.values().sum::<i64>().into());

        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Seedling time
// ---------------------------------------------------------------------------

/// Days each planting spent as a sapling, counted from sowing to the end of
/// the planting. Plantings still in progress show a missing planting date.
pub fn write_seedling_time<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::SeedlingTimeTitle, SEEDLING_TIME_HEADERS);

    let mut row_index = FIRST_DATA_ROW;
    for event in chronological(events) {
        let EventPayload::Planting {
            production_line_id,
            sowing_date,
            ..
        } = &event.payload
        else {
            continue;
        };

        let planting_date: CellValue = match event.end_time {
            Some(end) => ctx.date(end).into(),
            None => ctx.text(Label::Missing).into(),
        };
        let cells = vec![
            ctx.catalog.line_number(*production_line_id)?.into(),
            ctx.catalog.product_name(event.product_id, ctx.locale)?.into(),
            planting_date,
            ctx.date(*sowing_date).into(),
            event.end_time.map(|end| (end - *sowing_date).num_days()).into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Wastage
// ---------------------------------------------------------------------------

/// One row per wastage event, dated by its end time.
pub fn write_wastage_list<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::WastageTitle, WASTAGE_HEADERS);

    let mut row_index = FIRST_DATA_ROW;
    for event in chronological(events) {
        let EventPayload::Wastage {
            production_line_id,
            phase,
            reason,
            amount,
            additional_information,
        } = &event.payload
        else {
            continue;
        };

        let line = match production_line_id {
            Some(id) => Some(ctx.catalog.line_number(*id)?),
            None => None,
        };
        let cells = vec![
            ctx.date_time(event.end_time.unwrap_or(event.start_time)).into(),
            line.into(),
            event.creator_id.to_string().into(),
            ctx.catalog.product_name(event.product_id, ctx.locale)?.into(),
            phase.as_str().into(),
            reason.as_str().into(),
            additional_information.as_deref().into(),
            (*amount).into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, HarvestBasket, PackingBasket};
    use crate::facility::Facility;
    use crate::locale::Locale;
    use crate::product::{Catalog, LocalizedValue, PackageSize, Product, ProductionLine};
    use crate::reporting::sheet::Sheet;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};
    use uuid::Uuid;

    fn product(id: DbId, name: &str, raw: bool) -> Product {
        Product {
            id,
            facility: Facility::Juva,
            name: vec![LocalizedValue::new("en", name)],
            is_raw_material: raw,
            is_end_product: !raw,
            is_active: true,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                product(1, "Salad mix", false),
                product(10, "Lettuce", true),
                product(11, "Rucola", true),
                product(12, "Label roll", false),
            ],
            vec![ProductionLine {
                id: 1,
                facility: Facility::Juva,
                line_number: "A-4".into(),
                default_gutter_hole_count: Some(24),
            }],
        )
    }

    fn event(id: DbId, day: u32, payload: EventPayload) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap();
        Event {
            id,
            facility: Facility::Juva,
            product_id: 1,
            start_time: start,
            end_time: Some(start + Duration::minutes(30)),
            creator_id: Uuid::nil(),
            payload,
        }
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
        CellValue::Text(s.into())
    }

    #[test]
    fn planting_list_rows() {
        let planting = event(
            1,
            20,
            EventPayload::Planting {
                production_line_id: 1,
                gutter_count: 2,
                gutter_hole_count: 2,
                sowing_date: Utc.with_ymd_and_hms(2024, 6, 6, 8, 0, 0).unwrap(),
                cell_count: 4,
                worker_count: 1,
            },
        );
        let sheet = render(|s, ctx| write_planting_list(s, ctx, &[planting]));

        assert_eq!(sheet.get(3, 4), Some(&text("Sapling time (days)")));
        assert_eq!(sheet.get(4, 1), Some(&text("A-4")));
        assert_eq!(sheet.get(4, 2), Some(&text("20.06.2024")));
        assert_eq!(sheet.get(4, 3), Some(&text("06.06.2024")));
        assert_eq!(sheet.get(4, 4), Some(&CellValue::Integer(14)));
        assert_eq!(sheet.get(4, 6), Some(&CellValue::Number(0.125)));
    }

    #[test]
    fn harvest_list_ratios() {
        let harvest = event(
            1,
            10,
            EventPayload::Harvest {
                production_line_id: 1,
                harvest_type: "BOXING".into(),
                gutter_count: 50,
                gutter_hole_count: Some(2),
                sowing_date: None,
                cutting_height: Some(12),
                baskets: vec![HarvestBasket { weight_kg: 20.0 }; 3],
            },
        );
        let sheet = render(|s, ctx| write_harvest_list(s, ctx, &[harvest]));

        assert_eq!(sheet.get(4, 3), None);
        assert_eq!(sheet.get(4, 4), None);
        assert_eq!(sheet.get(4, 6), Some(&CellValue::Number(60.0)));
        assert_eq!(sheet.get(4, 7), Some(&CellValue::Integer(3)));
        assert_eq!(sheet.get(4, 8), Some(&CellValue::Number(1.2)));
        assert_eq!(sheet.get(4, 9), Some(&CellValue::Number(12.0)));
        assert_eq!(sheet.get(4, 10), Some(&CellValue::Number(20.0)));
        assert_eq!(sheet.get(4, 11), Some(&CellValue::Integer(12)));
    }

    #[test]
    fn harvest_without_baskets_leaves_per_basket_blank() {
        let harvest = event(
            1,
            10,
            EventPayload::Harvest {
                production_line_id: 1,
                harvest_type: "BOXING".into(),
                gutter_count: 0,
                gutter_hole_count: None,
                sowing_date: None,
                cutting_height: None,
                baskets: vec![],
            },
        );
        let sheet = render(|s, ctx| write_harvest_list(s, ctx, &[harvest]));

        assert_eq!(sheet.get(4, 8), None);
        assert_eq!(sheet.get(4, 9), None);
        assert_eq!(sheet.get(4, 10), None);
    }

    #[test]
    fn packing_list_adds_raw_material_columns() {
        let packing = |id, day, baskets: Vec<PackingBasket>| {
            event(
                id,
                day,
                EventPayload::Packing {
                    package_size: PackageSize {
                        id: 1,
                        name: "100".into(),
                        size: 100,
                    },
                    packed_count: 50,
                    baskets,
                },
            )
        };
        let events = vec![
            packing(
                2,
                12,
                vec![
                    PackingBasket { product_id: 10, count: 3 },
                    PackingBasket { product_id: 10, count: 2 },
                ],
            ),
            packing(
                1,
                11,
                vec![
                    PackingBasket { product_id: 11, count: 4 },
                    PackingBasket { product_id: 12, count: 9 },
                ],
            ),
        ];
        let sheet = render(|s, ctx| write_packing_list(s, ctx, &events));

        // First use decides column order; non raw materials are ignored.
        assert_eq!(sheet.get(3, 4), Some(&text("Rucola")));
        assert_eq!(sheet.get(3, 5), Some(&text("Lettuce")));
        assert_eq!(sheet.get(3, 6), Some(&text("Raw materials total")));

        assert_eq!(sheet.get(4, 1), Some(&text("11.06.2024")));
        assert_eq!(sheet.get(4, 2), Some(&CellValue::Integer(5000)));
        assert_eq!(sheet.get(4, 3), Some(&CellValue::Integer(50)));
        assert_eq!(sheet.get(4, 4), Some(&CellValue::Integer(4)));
        assert_eq!(sheet.get(4, 5), None);
        assert_eq!(sheet.get(4, 6), Some(&CellValue::Integer(4)));

        assert_eq!(sheet.get(5, 5), Some(&CellValue::Integer(5)));
        assert_eq!(sheet.get(5, 6), Some(&CellValue::Integer(5)));
    }

    fn planting(id: DbId, day: u32, ended: bool) -> Event {
        let mut planting = event(
            id,
            day,
            EventPayload::Planting {
                production_line_id: 1,
                gutter_count: 2,
                gutter_hole_count: 2,
                sowing_date: Utc.with_ymd_and_hms(2024, 6, 6, 8, 0, 0).unwrap(),
                cell_count: 4,
                worker_count: 1,
            },
        );
        if !ended {
            planting.end_time = None;
        }
        planting
    }

    #[test]
    fn seedling_time_counts_to_end_of_planting() {
        let events = vec![planting(2, 25, false), planting(1, 20, true)];
        let sheet = render(|s, ctx| write_seedling_time(s, ctx, &events));

        assert_eq!(sheet.get(0, 0), Some(&text("Seedling time")));
        assert_eq!(sheet.get(4, 0), Some(&text("A-4")));
        assert_eq!(sheet.get(4, 1), Some(&text("Salad mix")));
        assert_eq!(sheet.get(4, 2), Some(&text("20.06.2024")));
        assert_eq!(sheet.get(4, 3), Some(&text("06.06.2024")));
        assert_eq!(sheet.get(4, 4), Some(&CellValue::Integer(14)));

        assert_eq!(sheet.get(5, 2), Some(&text("Missing")));
        assert_eq!(sheet.get(5, 4), None);
    }

    #[test]
    fn wastage_list_columns() {
        let mut wastage = event(
            1,
            4,
            EventPayload::Wastage {
                production_line_id: Some(1),
                phase: EventType::Harvest,
                reason: "Mould".into(),
                amount: 3,
                additional_information: Some("Back corner".into()),
            },
        );
        let mut unlined = wastage.clone();
        unlined.id = 2;
        unlined.end_time = None;
        unlined.payload = EventPayload::Wastage {
            production_line_id: None,
            phase: EventType::Packing,
            reason: "Dropped".into(),
            amount: 1,
            additional_information: None,
        };
        wastage.start_time -= Duration::hours(1);
        let sheet = render(|s, ctx| write_wastage_list(s, ctx, &[unlined, wastage]));

        assert_eq!(sheet.get(3, 0), Some(&text("Date")));
        assert_eq!(sheet.get(3, 7), Some(&text("Amount")));

        assert_eq!(sheet.get(4, 0), Some(&text("04.06.2024 08:30")));
        assert_eq!(sheet.get(4, 1), Some(&text("A-4")));
        assert_eq!(
            sheet.get(4, 2),
            Some(&text("00000000-0000-0000-0000-000000000000"))
        );
        assert_eq!(sheet.get(4, 3), Some(&text("Salad mix")));
        assert_eq!(sheet.get(4, 4), Some(&text("HARVEST")));
        assert_eq!(sheet.get(4, 5), Some(&text("Mould")));
        assert_eq!(sheet.get(4, 6), Some(&text("Back corner")));
        assert_eq!(sheet.get(4, 7), Some(&CellValue::Integer(3)));

        // No end time: dated by the start.
        assert_eq!(sheet.get(5, 0), Some(&text("04.06.2024 08:00")));
        assert_eq!(sheet.get(5, 1), None);
        assert_eq!(sheet.get(5, 6), None);
    }
}
