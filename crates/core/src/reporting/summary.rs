//! Per-product summary reports: one row per product, then a totals row.
//!
//! The same [`ProductTable`] machinery also renders the work-hour
//! summaries in [`super::work_hours`], which differ only in accumulation
//! mode and columns.

use super::accumulate::{accumulate, totals, AccumulationMode, AggregationRow};
use super::layout::{write_preamble, write_row, ReportContext, FIRST_DATA_ROW};
use super::rates::{packed_from_harvested, packed_from_net_harvested};
use super::report_type::ReportType;
use super::sheet::{CellValue, TableWriter};
use crate::error::ReportError;
use crate::event::Event;
use crate::locale::Label;
use crate::types::DbId;

/// Column layout of a per-product table.
pub struct ProductTable {
    pub title: Label,
    /// Headers including the leading product column.
    pub headers: &'static [Label],
    pub mode: AccumulationMode,
    /// First cell of the closing row.
    pub totals_label: Label,
    /// Cells after the product column, for a product row or the totals row.
    pub cells: fn(&AggregationRow) -> Vec<CellValue>,
}

pub const SOWING_SUMMARY: ProductTable = ProductTable {
    title: Label::SowingSummaryTitle,
    headers: &[Label::Product, Label::Amount],
    mode: AccumulationMode::Totals,
    totals_label: Label::Total,
    cells: sowing_cells,
};

pub const PLANTING_SUMMARY: ProductTable = ProductTable {
    title: Label::PlantingSummaryTitle,
    headers: &[Label::Product, Label::GutterCount, Label::CartCount],
    mode: AccumulationMode::Totals,
    totals_label: Label::Total,
    cells: planting_cells,
};

pub const HARVEST_SUMMARY: ProductTable = ProductTable {
    title: Label::HarvestSummaryTitle,
    headers: &[Label::Product, Label::TableCount, Label::YieldKg, Label::BasketCount],
    mode: AccumulationMode::Totals,
    totals_label: Label::Total,
    cells: harvest_cells,
};

pub const PACKING_SUMMARY: ProductTable = ProductTable {
    title: Label::PackingSummaryTitle,
    headers: &[Label::Product, Label::Bags, Label::Boxes],
    mode: AccumulationMode::Totals,
    totals_label: Label::Total,
    cells: packing_cells,
};

pub const YIELD_SUMMARY: ProductTable = ProductTable {
    title: Label::YieldSummaryTitle,
    headers: &[
        Label::Product,
        Label::HarvestedBaskets,
        Label::Wastage,
        Label::Packed,
        Label::PackedFromHarvested,
        Label::PackedFromNetHarvested,
    ],
    mode: AccumulationMode::Totals,
    totals_label: Label::Total,
    cells: yield_cells,
};

fn sowing_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![row.amount.into()]
}

fn planting_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![row.amount.into(), row.carts.into()]
}

fn harvest_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![row.amount.into(), row.yield_kg.into(), row.basket_count.into()]
}

fn packing_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![row.packed_units.into(), row.packing_amount.into()]
}

/// Harvested amount is the basket count; ratios are blank when undefined.
fn yield_cells(row: &AggregationRow) -> Vec<CellValue> {
    vec![
        row.basket_count.into(),
        row.wastage_amount.into(),
        row.packing_amount.into(),
        packed_from_harvested(row).percent().into(),
        packed_from_net_harvested(row).percent().into(),
    ]
}

/// Layout for a summary report, or `None` for other families.
pub fn summary_table(report_type: ReportType) -> Option<&'static ProductTable> {
    match report_type {
        ReportType::SowingSummary => Some(&SOWING_SUMMARY),
        ReportType::PlantingSummary => Some(&PLANTING_SUMMARY),
        ReportType::HarvestSummary => Some(&HARVEST_SUMMARY),
        ReportType::PackingSummary => Some(&PACKING_SUMMARY),
        ReportType::YieldSummary => Some(&YIELD_SUMMARY),
        _ => None,
    }
}

/// Accumulate `events` per product and write the table.
///
/// Product rows are ordered by localized name so the output does not
/// depend on event order.
pub fn write_product_table<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    table: &ProductTable,
    events: &[Event],
) -> Result<(), ReportError> {
    write_preamble(writer, ctx, table.title, table.headers);

    let rows = accumulate(events, |e| e.product_id, table.mode);
    let mut product_ids: Vec<DbId> = rows.keys().copied().collect();
    ctx.catalog.sort_by_name(&mut product_ids, ctx.locale);

    let mut row_index = FIRST_DATA_ROW;
    for product_id in &product_ids {
        let name = ctx.catalog.product_name(*product_id, ctx.locale)?;
        let mut cells = vec![CellValue::from(name)];
        cells.extend((table.cells)(&rows[product_id]));
        write_row(writer, row_index, cells);
        row_index += 1;
    }

    let total = totals(rows.values());
    let mut cells = vec![CellValue::from(ctx.text(table.totals_label))];
    cells.extend((table.cells)(&total));
    write_row(writer, row_index, cells);

    Ok(())
}
