//! Shared sheet layout: title, date range, header row, then data rows.

use chrono::FixedOffset;

use super::sheet::{CellValue, TableWriter};
use crate::locale::{date_range, format_date, format_date_time, Label, Locale};
use crate::product::Catalog;
use crate::types::Timestamp;

pub const TITLE_ROW: u32 = 0;
pub const DATE_RANGE_ROW: u32 = 1;
pub const HEADER_ROW: u32 = 3;
pub const FIRST_DATA_ROW: u32 = 4;

/// Everything a layout needs besides the events themselves.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub locale: Locale,
    pub from: Timestamp,
    pub to: Timestamp,
    /// Offset dates are printed in.
    pub offset: FixedOffset,
    pub catalog: &'a Catalog,
}

impl ReportContext<'_> {
    pub fn text(&self, label: Label) -> &'static str {
        label.text(self.locale)
    }

    pub fn date(&self, ts: Timestamp) -> String {
        format_date(ts, self.offset)
    }

    pub fn date_time(&self, ts: Timestamp) -> String {
        format_date_time(ts, self.offset)
    }
}

/// Write title, date range and a header row of labels starting at column 0.
pub fn write_preamble<W: TableWriter>(
    writer: &mut W,
    ctx: &ReportContext<'_>,
    title: Label,
    headers: &[Label],
) {
    writer.set_cell(TITLE_ROW, 0, ctx.text(title).into());
    writer.set_cell(
        DATE_RANGE_ROW,
        0,
        date_range(ctx.locale, ctx.from, ctx.to, ctx.offset).into(),
    );
    for (column, header) in headers.iter().enumerate() {
        writer.set_cell(HEADER_ROW, column as u32, ctx.text(*header).into());
    }
}

/// Write consecutive cells of one row starting at column 0.
pub fn write_row<W: TableWriter>(writer: &mut W, row: u32, cells: Vec<CellValue>) {
    for (column, value) in cells.into_iter().enumerate() {
        writer.set_cell(row, column as u32, value);
    }
}
