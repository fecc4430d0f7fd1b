//! Plant unit reports: one phase per product, every phase per product, and
//! the cultivation summary in carts, units and baskets.

use std::collections::HashMap;

use super::accumulate::CART_CAPACITY;
use super::layout::{write_preamble, write_row, ReportContext, FIRST_DATA_ROW, HEADER_ROW};
use super::report_type::ReportType;
use super::sheet::{CellValue, TableWriter};
use super::units::{tally, PhaseUnits, UnitCounter};
use crate::error::ReportError;
use crate::event::{Event, EventType};
use crate::locale::Label;
use crate::types::DbId;

/// Columns of the product phase count report.
const PHASES: [(EventType, Label); 6] = [
    (EventType::Sowing, Label::SowedTitle),
    (EventType::TableSpread, Label::SpreadTitle),
    (EventType::Planting, Label::PlantedTitle),
    (EventType::Harvest, Label::HarvestedTitle),
    (EventType::Packing, Label::PackedTitle),
    (EventType::Wastage, Label::WastageTitle),
];

/// The summary has a two-row header, so data starts one row later.
const SUMMARY_FIRST_DATA_ROW: u32 = FIRST_DATA_ROW + 1;

/// Phase counted by a single-phase report.
pub fn counted_phase(report_type: ReportType) -> Option<EventType> {
    match report_type {
        ReportType::Sowed => Some(EventType::Sowing),
        ReportType::Spread => Some(EventType::TableSpread),
        ReportType::Planted => Some(EventType::Planting),
        ReportType::Harvested => Some(EventType::Harvest),
        ReportType::Packed => Some(EventType::Packing),
        _ => None,
    }
}

fn tally_events(
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<HashMap<DbId, PhaseUnits>, ReportError> {
    let counter = UnitCounter::new(events, ctx.catalog);
    tally(events, &counter)
}

/// Product ids of `rows` passing `keep`, ordered by localized name.
fn product_order(
    ctx: &ReportContext<'_>,
    rows: &HashMap<DbId, PhaseUnits>,
    keep: impl Fn(&PhaseUnits) -> bool,
) -> Vec<DbId> {
    let mut ids: Vec<DbId> = rows
        .iter()
        .filter(|(_, row)| keep(row))
        .map(|(id, _)| *id)
        .collect();
    ctx.catalog.sort_by_name(&mut ids, ctx.locale);
    ids
}

/// Product and unit count for every product with an event of `phase`.
pub fn write_unit_count<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    title: Label,
    phase: EventType,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, title, &[Label::Product, Label::Amount]);

    let rows = tally_events(ctx, events)?;
    let mut row_index = FIRST_DATA_ROW;
    for product_id in product_order(ctx, &rows, |row| row.has(phase)) {
        let name = ctx.catalog.product_name(product_id, ctx.locale)?;
        write_row(
            writer,
            row_index,
            vec![name.into(), rows[&product_id].get(phase).into()],
        );
        row_index += 1;
    }

    Ok(())
}

/// Unit counts of every phase side by side.
pub fn write_phase_counts<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    let mut headers = vec![Label::Product];
    headers.extend(PHASES.iter().map(|(_, label)| *label));
    write_preamble(writer, ctx, Label::ProductPhaseCountTitle, &headers);

    let rows = tally_events(ctx, events)?;
    let mut row_index = FIRST_DATA_ROW;
    for product_id in product_order(ctx, &rows, |_| true) {
        let row = &rows[&product_id];
        let mut cells = vec![CellValue::from(
            ctx.catalog.product_name(product_id, ctx.locale)?,
        )];
        cells.extend(PHASES.iter().map(|(phase, _)| CellValue::from(row.get(*phase))));
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

/// Sowed and planted carts, harvested units and baskets per product.
pub fn write_cultivation_summary<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, Label::CultivationSummaryTitle, &[]);
    write_row(
        writer,
        HEADER_ROW,
        [
            None,
            Some(Label::SowedTitle),
            Some(Label::PlantedTitle),
            Some(Label::HarvestedTitle),
            Some(Label::HarvestedTitle),
        ]
        .into_iter()
        .map(|label| CellValue::from(label.map(|l| ctx.text(l))))
        .collect(),
    );
    write_row(
        writer,
        HEADER_ROW + 1,
        [
            Label::Product,
            Label::CartCount,
            Label::CartCount,
            Label::Amount,
            Label::BasketCount,
        ]
        .into_iter()
        .map(|label| CellValue::from(ctx.text(label)))
        .collect(),
    );

    let rows = tally_events(ctx, events)?;
    let mut row_index = SUMMARY_FIRST_DATA_ROW;
    for product_id in product_order(ctx, &rows, |_| true) {
        let row = &rows[&product_id];
        let cells = vec![
            ctx.catalog.product_name(product_id, ctx.locale)?.into(),
            (row.get(EventType::Sowing) as f64 / CART_CAPACITY).into(),
            (row.get(EventType::Planting) as f64 / CART_CAPACITY).into(),
            row.get(EventType::Harvest).into(),
            row.harvested_baskets.into(),
        ];
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}
