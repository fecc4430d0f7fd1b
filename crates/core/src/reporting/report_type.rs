//! Report catalogue: identifiers, families, source event types and output
//! formats.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ReportError;
use crate::event::EventType;
use crate::locale::Label;

// ---------------------------------------------------------------------------
// Output formats
// ---------------------------------------------------------------------------

/// Every report renders in every format; XLSX unless asked otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [Self::Xlsx, Self::Csv, Self::Json];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xlsx => "XLSX",
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XLSX" => Ok(Self::Xlsx),
            "CSV" => Ok(Self::Csv),
            "JSON" => Ok(Self::Json),
            other => Err(ReportError::InvalidField {
                field: "format",
                reason: format!("unknown format '{other}'"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFamily {
    /// One row per product plus a totals row.
    Summary,
    /// One row per event with per-hour rates.
    WorkHours,
    /// One row per product with per-hour rates plus a combined row.
    WorkHourSummary,
    /// One row per event, no totals.
    List,
    /// Plant units per product and cultivation phase.
    UnitCount,
    /// One row per product relating two cultivation phases.
    Cultivation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    SowingSummary,
    PlantingSummary,
    HarvestSummary,
    PackingSummary,
    YieldSummary,
    SowingWorkHours,
    PlantingWorkHours,
    HarvestWorkHours,
    PackingWorkHours,
    SowingWorkHourSummary,
    PlantingWorkHourSummary,
    HarvestWorkHourSummary,
    PackingWorkHourSummary,
    PlantingList,
    HarvestList,
    PackingList,
    SeedlingTime,
    Wastage,
    Sowed,
    Spread,
    Planted,
    Harvested,
    Packed,
    ProductPhaseCount,
    CultivationSummary,
    Yield,
    PlantingYield,
    GrowthTime,
}

impl ReportType {
    pub const ALL: [ReportType; 28] = [
        Self::SowingSummary,
        Self::PlantingSummary,
        Self::HarvestSummary,
        Self::PackingSummary,
        Self::YieldSummary,
        Self::SowingWorkHours,
        Self::PlantingWorkHours,
        Self::HarvestWorkHours,
        Self::PackingWorkHours,
        Self::SowingWorkHourSummary,
        Self::PlantingWorkHourSummary,
        Self::HarvestWorkHourSummary,
        Self::PackingWorkHourSummary,
        Self::PlantingList,
        Self::HarvestList,
        Self::PackingList,
        Self::SeedlingTime,
        Self::Wastage,
        Self::Sowed,
        Self::Spread,
        Self::Planted,
        Self::Harvested,
        Self::Packed,
        Self::ProductPhaseCount,
        Self::CultivationSummary,
        Self::Yield,
        Self::PlantingYield,
        Self::GrowthTime,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::SowingSummary => "SOWING_SUMMARY",
            Self::PlantingSummary => "PLANTING_SUMMARY",
            Self::HarvestSummary => "HARVEST_SUMMARY",
            Self::PackingSummary => "PACKING_SUMMARY",
            Self::YieldSummary => "YIELD_SUMMARY",
            Self::SowingWorkHours => "SOWING_WORK_HOURS",
            Self::PlantingWorkHours => "PLANTING_WORK_HOURS",
            Self::HarvestWorkHours => "HARVEST_WORK_HOURS",
            Self::PackingWorkHours => "PACKING_WORK_HOURS",
            Self::SowingWorkHourSummary => "SOWING_WORK_HOUR_SUMMARY",
            Self::PlantingWorkHourSummary => "PLANTING_WORK_HOUR_SUMMARY",
            Self::HarvestWorkHourSummary => "HARVEST_WORK_HOUR_SUMMARY",
            Self::PackingWorkHourSummary => "PACKING_WORK_HOUR_SUMMARY",
            Self::PlantingList => "PLANTING_LIST",
            Self::HarvestList => "HARVEST_LIST",
            Self::PackingList => "PACKING_LIST",
            Self::SeedlingTime => "SEEDLING_TIME",
            Self::Wastage => "WASTAGE",
            Self::Sowed => "SOWED",
            Self::Spread => "SPREAD",
            Self::Planted => "PLANTED",
            Self::Harvested => "HARVESTED",
            Self::Packed => "PACKED",
            Self::ProductPhaseCount => "PRODUCT_PHASE_COUNT",
            Self::CultivationSummary => "SUMMARY",
            Self::Yield => "YIELD",
            Self::PlantingYield => "PLANTING_YIELD",
            Self::GrowthTime => "GROWTH_TIME",
        }
    }

    pub fn family(self) -> ReportFamily {
        match self {
            Self::SowingSummary
            | Self::PlantingSummary
            | Self::HarvestSummary
            | Self::PackingSummary
            | Self::YieldSummary => ReportFamily::Summary,
            Self::SowingWorkHours
            | Self::PlantingWorkHours
            | Self::HarvestWorkHours
            | Self::PackingWorkHours => ReportFamily::WorkHours,
            Self::SowingWorkHourSummary
            | Self::PlantingWorkHourSummary
            | Self::HarvestWorkHourSummary
            | Self::PackingWorkHourSummary => ReportFamily::WorkHourSummary,
            Self::PlantingList
            | Self::HarvestList
            | Self::PackingList
            | Self::SeedlingTime
            | Self::Wastage => ReportFamily::List,
            Self::Sowed
            | Self::Spread
            | Self::Planted
            | Self::Harvested
            | Self::Packed
            | Self::ProductPhaseCount
            | Self::CultivationSummary => ReportFamily::UnitCount,
            Self::Yield | Self::PlantingYield | Self::GrowthTime => ReportFamily::Cultivation,
        }
    }

    /// Event types the report reads.
    pub fn source_types(self) -> &'static [EventType] {
        match self {
            Self::SowingSummary | Self::SowingWorkHours | Self::SowingWorkHourSummary => {
                &[EventType::Sowing]
            }
            Self::PlantingSummary
            | Self::PlantingWorkHours
            | Self::PlantingWorkHourSummary
            | Self::PlantingList
            | Self::SeedlingTime
            | Self::Planted => &[EventType::Planting],
            Self::HarvestSummary
            | Self::HarvestWorkHours
            | Self::HarvestWorkHourSummary
            | Self::HarvestList => &[EventType::Harvest],
            Self::PackingSummary
            | Self::PackingWorkHours
            | Self::PackingWorkHourSummary
            | Self::PackingList => &[EventType::Packing],
            Self::YieldSummary => &[EventType::Harvest, EventType::Wastage, EventType::Packing],
            Self::Wastage => &[EventType::Wastage],
            Self::Sowed => &[EventType::Sowing],
            // Spreads are counted with the pot type of the product's sowing.
            Self::Spread => &[EventType::TableSpread, EventType::Sowing],
            // Plantings fill in missing harvest gutter hole counts.
            Self::Harvested => &[EventType::Harvest, EventType::Planting],
            Self::Packed => &[EventType::Packing],
            Self::ProductPhaseCount => &[
                EventType::Sowing,
                EventType::TableSpread,
                EventType::Planting,
                EventType::Harvest,
                EventType::Packing,
                EventType::Wastage,
            ],
            Self::CultivationSummary => {
                &[EventType::Sowing, EventType::Planting, EventType::Harvest]
            }
            Self::Yield => &[EventType::Harvest, EventType::Planting, EventType::Packing],
            Self::PlantingYield => &[EventType::Planting, EventType::Sowing],
            Self::GrowthTime => &[
                EventType::Sowing,
                EventType::Packing,
                EventType::CultivationObservation,
            ],
        }
    }

    pub fn title(self) -> Label {
        match self {
            Self::SowingSummary => Label::SowingSummaryTitle,
            Self::PlantingSummary => Label::PlantingSummaryTitle,
            Self::HarvestSummary => Label::HarvestSummaryTitle,
            Self::PackingSummary => Label::PackingSummaryTitle,
            Self::YieldSummary => Label::YieldSummaryTitle,
            Self::SowingWorkHours => Label::SowingWorkHoursTitle,
            Self::PlantingWorkHours => Label::PlantingWorkHoursTitle,
            Self::HarvestWorkHours => Label::HarvestWorkHoursTitle,
            Self::PackingWorkHours => Label::PackingWorkHoursTitle,
            Self::SowingWorkHourSummary => Label::SowingWorkHourSummaryTitle,
            Self::PlantingWorkHourSummary => Label::PlantingWorkHourSummaryTitle,
            Self::HarvestWorkHourSummary => Label::HarvestWorkHourSummaryTitle,
            Self::PackingWorkHourSummary => Label::PackingWorkHourSummaryTitle,
            Self::PlantingList => Label::PlantingListTitle,
            Self::HarvestList => Label::HarvestListTitle,
            Self::PackingList => Label::PackingListTitle,
            Self::SeedlingTime => Label::SeedlingTimeTitle,
            Self::Wastage => Label::WastageTitle,
            Self::Sowed => Label::SowedTitle,
            Self::Spread => Label::SpreadTitle,
            Self::Planted => Label::PlantedTitle,
            Self::Harvested => Label::HarvestedTitle,
            Self::Packed => Label::PackedTitle,
            Self::ProductPhaseCount => Label::ProductPhaseCountTitle,
            Self::CultivationSummary => Label::CultivationSummaryTitle,
            Self::Yield => Label::YieldTitle,
            Self::PlantingYield => Label::PlantingYieldTitle,
            Self::GrowthTime => Label::GrowthTimeTitle,
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    /// Match an identifier case-insensitively. The older `JUVA_<ID>_REPORT`
    /// spelling is accepted as an alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let canonical = upper
            .strip_prefix("JUVA_")
            .and_then(|rest| rest.strip_suffix("_REPORT"))
            .unwrap_or(upper.as_str());

        Self::ALL
            .into_iter()
            .find(|t| t.id() == canonical)
            .ok_or_else(|| ReportError::UnknownReportType(s.to_string()))
    }
}
