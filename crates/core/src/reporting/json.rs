//! JSON renderings: flat wastage records, and any sheet as an array of rows.

use serde::Serialize;
use serde_json::Value;

use super::layout::ReportContext;
use super::sheet::{CellValue, Sheet};
use crate::error::ReportError;
use crate::event::{Event, EventPayload};

/// One wastage event, flattened for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WastageRecord {
    pub line_number: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub user: String,
    pub product_name: String,
    pub event_phase: String,
    pub wastage_reason: String,
    pub additional_information: Option<String>,
    pub amount: i32,
}

/// Flatten wastage events in start-time order. Other event types are skipped.
pub fn wastage_records(
    events: &[Event],
    ctx: &ReportContext<'_>,
) -> Result<Vec<WastageRecord>, ReportError> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| (e.start_time, e.id));

    let mut records = Vec::with_capacity(sorted.len());
    for event in sorted {
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

        let line_number = match production_line_id {
            Some(id) => Some(ctx.catalog.line_number(*id)?.to_string()),
            None => None,
        };

        records.push(WastageRecord {
            line_number,
            start_time: ctx.date_time(event.start_time),
            end_time: event.end_time.map(|t| ctx.date_time(t)),
            user: event.creator_id.to_string(),
            product_name: ctx
                .catalog
                .product_name(event.product_id, ctx.locale)?
                .to_string(),
            event_phase: phase.to_string(),
            wastage_reason: reason.clone(),
            additional_information: additional_information.clone(),
            amount: *amount,
        });
    }
    Ok(records)
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(s) => Value::String(s.clone()),
        CellValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Integer(i) => Value::from(*i),
        CellValue::Empty => Value::Null,
    }
}

/// The sheet as an array of dense row arrays; blank cells become `null`.
pub fn sheet_to_json(sheet: &Sheet) -> Value {
    Value::Array(
        sheet
            .rows()
            .iter()
            .map(|row| Value::Array(row.iter().map(cell_to_json).collect()))
            .collect(),
    )
}

pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ReportError> {
    serde_json::to_vec(value).map_err(|e| ReportError::Generation(e.to_string()))
}
