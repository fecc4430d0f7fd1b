//! Per-request report pipeline: fetch, accumulate, write rows, encode.
//!
//! Each stage either succeeds or aborts the whole request; nothing is
//! retried and no partially rendered report is ever returned.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use super::csv::build_csv;
use super::json::{sheet_to_json, to_json_bytes, wastage_records};
use super::layout::ReportContext;
use super::list::{
    write_harvest_list, write_packing_list, write_planting_list, write_seedling_time,
    write_wastage_list,
};
use super::report_type::{ReportFamily, ReportFormat, ReportType};
use super::sheet::Sheet;
use super::store::EventStore;
use super::xlsx::build_xlsx;
use super::{counts, cultivation, summary, work_hours};
use crate::error::ReportError;
use crate::event::Event;
use crate::facility::Facility;
use crate::locale::Locale;
use crate::product::Catalog;
use crate::types::Timestamp;

/// A validated report invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub facility: Facility,
    pub report_type: ReportType,
    pub from: Timestamp,
    pub to: Timestamp,
    pub locale: Locale,
    /// `None` selects XLSX.
    pub format: Option<ReportFormat>,
    /// Offset of `fromTime` as given; report dates are printed in it.
    pub utc_offset: FixedOffset,
}

impl ReportRequest {
    /// Build a request from raw parameters.
    ///
    /// Times are ISO-8601: an RFC 3339 timestamp, a date-time without
    /// offset (taken as UTC) or a bare date (midnight UTC). The offset of
    /// `fromTime` becomes the offset report dates are printed in.
    pub fn parse(
        facility: Facility,
        report_type: &str,
        from_time: Option<&str>,
        to_time: Option<&str>,
        locale: Locale,
        format: Option<&str>,
    ) -> Result<Self, ReportError> {
        let report_type: ReportType = report_type.parse()?;
        let from = parse_time("fromTime", from_time)?;
        let to = parse_time("toTime", to_time)?;
        let utc_offset = *from.offset();
        let format = format
            .filter(|f| !f.trim().is_empty())
            .map(str::parse::<ReportFormat>)
            .transpose()?;

        let request = Self {
            facility,
            report_type,
            from: from.with_timezone(&Utc),
            to: to.with_timezone(&Utc),
            locale,
            format,
            utc_offset,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.from > self.to {
            return Err(ReportError::InvalidField {
                field: "toTime",
                reason: "must not be before fromTime".to_string(),
            });
        }
        Ok(())
    }

    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }

    /// Download name, e.g. `harvest_summary_20240601-20240630.xlsx`.
    pub fn filename(&self) -> String {
        format!(
            "{}_{}-{}.{}",
            self.report_type.id().to_ascii_lowercase(),
            self.from.with_timezone(&self.utc_offset).format("%Y%m%d"),
            self.to.with_timezone(&self.utc_offset).format("%Y%m%d"),
            self.effective_format().extension()
        )
    }
}

/// Parse one ISO-8601 time parameter, keeping the offset it was given in.
pub fn parse_time(
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<FixedOffset>, ReportError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ReportError::MissingRequiredField(field))?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().fixed_offset());
    }

    Err(ReportError::InvalidField {
        field,
        reason: format!("'{value}' is not an ISO-8601 time"),
    })
}

/// Encoded report ready to be sent.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Run the whole pipeline for `request`.
pub async fn generate_report(
    store: &dyn EventStore,
    request: &ReportRequest,
) -> Result<RenderedReport, ReportError> {
    request.validate()?;
    let report_type = request.report_type;
    let format = request.effective_format();

    let mut events: Vec<Event> = Vec::new();
    for event_type in report_type.source_types() {
        let mut batch = store
            .list_events(request.facility, *event_type, request.from, request.to)
            .await?;
        events.append(&mut batch);
    }

    let catalog = Catalog::new(
        store.list_products(request.facility).await?,
        store.list_production_lines(request.facility).await?,
    );
    let ctx = ReportContext {
        locale: request.locale,
        from: request.from,
        to: request.to,
        offset: request.utc_offset,
        catalog: &catalog,
    };

    let bytes = if report_type == ReportType::Wastage && format == ReportFormat::Json {
        to_json_bytes(&wastage_records(&events, &ctx)?)?
    } else {
        let sheet = build_sheet(report_type, &ctx, &events)?;
        match format {
            ReportFormat::Xlsx => build_xlsx(&sheet)?,
            ReportFormat::Csv => build_csv(&sheet).into_bytes(),
            ReportFormat::Json => to_json_bytes(&sheet_to_json(&sheet))?,
        }
    };

    Ok(RenderedReport {
        bytes,
        content_type: format.content_type(),
        filename: request.filename(),
    })
}

/// Write the layout of a spreadsheet report into a fresh sheet.
pub fn build_sheet(
    report_type: ReportType,
    ctx: &ReportContext<'_>,
    events: &[Event],
) -> Result<Sheet, ReportError> {
    let mut sheet = Sheet::new(ctx.text(report_type.title()));

    match report_type.family() {
        ReportFamily::Summary => {
            let table = summary::summary_table(report_type).ok_or_else(|| missing(report_type))?;
            summary::write_product_table(&mut sheet, ctx, table, events)?;
        }
        ReportFamily::WorkHourSummary => {
            let table =
                work_hours::summary_table(report_type).ok_or_else(|| missing(report_type))?;
            summary::write_product_table(&mut sheet, ctx, table, events)?;
        }
        ReportFamily::WorkHours => {
            let table = work_hours::event_table(report_type).ok_or_else(|| missing(report_type))?;
            work_hours::write_event_table(&mut sheet, ctx, table, events)?;
        }
        ReportFamily::List => match report_type {
            ReportType::PlantingList => write_planting_list(&mut sheet, ctx, events)?,
            ReportType::HarvestList => write_harvest_list(&mut sheet, ctx, events)?,
            ReportType::PackingList => write_packing_list(&mut sheet, ctx, events)?,
            ReportType::SeedlingTime => write_seedling_time(&mut sheet, ctx, events)?,
            ReportType::Wastage => write_wastage_list(&mut sheet, ctx, events)?,
            other => return Err(missing(other)),
        },
        ReportFamily::UnitCount => match report_type {
            ReportType::ProductPhaseCount => counts::write_phase_counts(&mut sheet, ctx, events)?,
            ReportType::CultivationSummary => {
                counts::write_cultivation_summary(&mut sheet, ctx, events)?
            }
            other => {
                let phase = counts::counted_phase(other).ok_or_else(|| missing(other))?;
                counts::write_unit_count(&mut sheet, ctx, other.title(), phase, events)?;
            }
        },
        ReportFamily::Cultivation => match report_type {
            ReportType::Yield => cultivation::write_yield(&mut sheet, ctx, events)?,
            ReportType::PlantingYield => {
                cultivation::write_planting_yield(&mut sheet, ctx, events)?
            }
            ReportType::GrowthTime => cultivation::write_growth_time(&mut sheet, ctx, events)?,
            other => return Err(missing(other)),
        },
    }

    Ok(sheet)
}

fn missing(report_type: ReportType) -> ReportError {
    ReportError::Generation(format!("no layout registered for {report_type}"))
}
