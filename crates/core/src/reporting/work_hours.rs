//! Work-hour reports.
//!
//! Per-event reports list every timed event with its duration and hourly
//! rates. Per-product summaries reuse [`ProductTable`] in work-hour mode and
//! close with a combined row whose rates use the total duration.

use super::accumulate::{AccumulationMode, AggregationRow};
use super::layout::{write_preamble, write_row, ReportContext, FIRST_DATA_ROW};
use super::rates::{format_duration, per_hour};
use super::report_type::ReportType;
use super::sheet::{CellValue, TableWriter};
use super::summary::ProductTable;
use crate::error::ReportError;
use crate::event::Event;
use crate::locale::Label;

// ---------------------------------------------------------------------------
// Cell sets
// ---------------------------------------------------------------------------

fn sowing_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![
        format_duration(row.duration_minutes).into(),
        row.amount.into(),
        row.carts.into(),
        per_hour(row.amount as f64, row.duration_minutes).into(),
        per_hour(row.carts, row.duration_minutes).into(),
    ]
}

fn planting_event_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![
        format_duration(row.duration_minutes).into(),
        row.amount.into(),
        row.carts.into(),
        per_hour(row.carts, row.duration_minutes).into(),
    ]
}

fn harvest_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![
        format_duration(row.duration_minutes).into(),
        row.amount.into(),
        row.yield_kg.into(),
        per_hour(row.amount as f64, row.duration_minutes).into(),
        per_hour(row.yield_kg, row.duration_minutes).into(),
    ]
}

fn packing_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![
        format_duration(row.duration_minutes).into(),
        row.packed_units.into(),
        row.packing_amount.into(),
        per_hour(row.packed_units as f64, row.duration_minutes).into(),
        per_hour(row.packing_amount as f64, row.duration_minutes).into(),
    ]
}

// ---------------------------------------------------------------------------
// Per-event reports
// ---------------------------------------------------------------------------

/// Column layout of a per-event work-hour report.
pub struct EventTable {
    pub title: Label,
    /// Headers including the leading date and product columns.
    pub headers: &'static [Label],
    /// Cells after the date and product columns.
    pub cells: fn(&AggregationRow) -> Vec<CellValue>,
}

pub const SOWING_WORK_HOURS: EventTable = EventTable {
    title: Label::SowingWorkHoursTitle,
    headers: &[
        Label::SowingDate,
        Label::Product,
        Label::Duration,
        Label::Amount,
        Label::CartCount,
        Label::AmountPerHour,
        Label::CartsPerHour,
    ],
    cells: sowing_cells,
};

pub const PLANTING_WORK_HOURS: EventTable = EventTable {
    title: Label::PlantingWorkHoursTitle,
    headers: &[
        Label::PlantingDate,
        Label::Product,
        Label::Duration,
        Label::GutterCount,
        Label::CartCount,
        Label::CartsPerHour,
    ],
    cells: planting_event_cells,
};

pub const HARVEST_WORK_HOURS: EventTable = EventTable {
    title: Label::HarvestWorkHoursTitle,
    headers: &[
        Label::HarvestDate,
        Label::Product,
        Label::Duration,
        Label::TableCount,
        Label::YieldKg,
        Label::TablesPerHour,
        Label::YieldPerHour,
    ],
    cells: harvest_cells,
};

pub const PACKING_WORK_HOURS: EventTable = EventTable {
    title: Label::PackingWorkHoursTitle,
    headers: &[
        Label::PackingDate,
        Label::Product,
        Label::Duration,
        Label::Bags,
        Label::Boxes,
        Label::BagsPerHour,
        Label::BoxesPerHour,
    ],
    cells: packing_cells,
};

pub fn event_table(report_type: ReportType) -> Option<&'static EventTable> {
    match report_type {
        ReportType::SowingWorkHours => Some(&SOWING_WORK_HOURS),
        ReportType::PlantingWorkHours => Some(&PLANTING_WORK_HOURS),
        ReportType::HarvestWorkHours => Some(&HARVEST_WORK_HOURS),
        ReportType::PackingWorkHours => Some(&PACKING_WORK_HOURS),
        _ => None,
    }
}

/// Write one row per timed event in start-time order. Events without an
/// end time are left out.
pub fn write_event_table<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    table: &EventTable,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, table.title, table.headers);

    let mut timed: Vec<&Event> = events.iter().filter(|e| e.end_time.is_some()).collect();
    timed.sort_by_key(|e| (e.start_time, e.id));

    let mut row_index = FIRST_DATA_ROW;
    for event in timed {
        let mut row = AggregationRow::default();
        row.absorb(event, AccumulationMode::WorkHours);

        let name = ctx.catalog.product_name(event.product_id, ctx.locale)?;
        let mut cells = vec![ctx.date(event.start_time).into(), CellValue::from(name)];
        cells.extend((table.cells)(&row));
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Per-product summaries
// ---------------------------------------------------------------------------

pub const SOWING_WORK_HOUR_SUMMARY: ProductTable = ProductTable {
    title: Label::SowingWorkHourSummaryTitle,
    headers: &[
        Label::Product,
        Label::Duration,
        Label::Amount,
        Label::CartCount,
        Label::AmountPerHour,
        Label::CartsPerHour,
    ],
    mode: AccumulationMode::WorkHours,
    totals_label: Label::Combined,
    cells: sowing_cells,
};

pub const PLANTING_WORK_HOUR_SUMMARY: ProductTable = ProductTable {
    title: Label::PlantingWorkHourSummaryTitle,
    headers: &[
        Label::Product,
        Label::Duration,
        Label::GutterCount,
        Label::CartCount,
        Label::AmountPerHour,
        Label::CartsPerHour,
    ],
    mode: AccumulationMode::WorkHours,
    totals_label: Label::Combined,
    cells: sowing_cells,
};

pub const HARVEST_WORK_HOUR_SUMMARY: ProductTable = ProductTable {
    title: Label::HarvestWorkHourSummaryTitle,
    headers: &[
        Label::Product,
        Label::Duration,
        Label::TableCount,
        Label::YieldKg,
        Label::TablesPerHour,
        Label::YieldPerHour,
    ],
    mode: AccumulationMode::WorkHours,
    totals_label: Label::Combined,
    cells: harvest_cells,
};

pub const PACKING_WORK_HOUR_SUMMARY: ProductTable = ProductTable {
    title: Label::PackingWorkHourSummaryTitle,
    headers: &[
        Label::Product,
        Label::Duration,
        Label::Bags,
        Label::Boxes,
        Label::BagsPerHour,
        Label::BoxesPerHour,
    ],
    mode: AccumulationMode::WorkHours,
    totals_label: Label::Combined,
    cells: packing_cells,
};

pub fn summary_table(report_type: ReportType) -> Option<&'static ProductTable> {
    match report_type {
        ReportType::SowingWorkHourSummary => Some(&SOWING_WORK_HOUR_SUMMARY),
        ReportType::PlantingWorkHourSummary => Some(&PLANTING_WORK_HOUR_SUMMARY),
        ReportType::HarvestWorkHourSummary => Some(&HARVEST_WORK_HOUR_SUMMARY),
        ReportType::PackingWorkHourSummary => Some(&PACKING_WORK_HOUR_SUMMARY),
        _ => None,
    }
}
