//! Report locales and the built-in label catalogue.
//!
//! Reports are rendered in English or Finnish. Every fixed string that lands
//! in a spreadsheet (titles, column headers, totals rows, the date range
//! line) is a [`Label`] looked up here, so layouts never hard-code text.

use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Date format used in report cells (`dd.MM.yyyy`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Date-time format used in JSON report records (`dd.MM.yyyy HH:mm`).
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fi,
}

impl Locale {
    /// ISO 639-1 language code; also the `language` of a [`crate::product::LocalizedValue`].
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fi => "fi",
        }
    }

    /// Parse a language tag such as `fi`, `fi-FI` or `en_GB`.
    ///
    /// Returns `None` for languages without a catalogue.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Some(Self::En),
            "fi" => Some(Self::Fi),
            _ => None,
        }
    }

    /// Resolve the first supported language of an `Accept-Language` header.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .find_map(Self::from_tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| CoreError::Validation(format!("Unsupported locale '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Label catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    // Titles
    SowingSummaryTitle,
    PlantingSummaryTitle,
    HarvestSummaryTitle,
    PackingSummaryTitle,
    YieldSummaryTitle,
    SowingWorkHoursTitle,
    PlantingWorkHoursTitle,
    HarvestWorkHoursTitle,
    PackingWorkHoursTitle,
    SowingWorkHourSummaryTitle,
    PlantingWorkHourSummaryTitle,
    HarvestWorkHourSummaryTitle,
    PackingWorkHourSummaryTitle,
    PlantingListTitle,
    HarvestListTitle,
    PackingListTitle,
    WastageTitle,
    SowedTitle,
    SpreadTitle,
    PlantedTitle,
    HarvestedTitle,
    PackedTitle,
    ProductPhaseCountTitle,
    CultivationSummaryTitle,
    YieldTitle,
    PlantingYieldTitle,
    GrowthTimeTitle,
    SeedlingTimeTitle,

    // Row labels
    Total,
    Combined,

    // Column headers
    Product,
    Amount,
    GutterCount,
    CartCount,
    TableCount,
    YieldKg,
    BasketCount,
    Bags,
    Boxes,
    HarvestedBaskets,
    Wastage,
    Packed,
    PackedFromHarvested,
    PackedFromNetHarvested,
    SowingDate,
    PlantingDate,
    HarvestDate,
    PackingDate,
    Duration,
    AmountPerHour,
    CartsPerHour,
    TablesPerHour,
    YieldPerHour,
    BagsPerHour,
    BoxesPerHour,
    Line,
    SaplingDays,
    GrowthDays,
    KgPerTable,
    GramsPerUnit,
    KgPerBasket,
    CuttingHeight,
    TotalRawMaterials,
    WastageDate,
    Worker,
    Phase,
    WastageReason,
    AdditionalInformation,
    HarvestedUnits,
    UnitsInGutters,
    UnitsFromCells,
    YieldPercentage,
    AverageWeight,

    // Cell values
    Missing,
}

impl Label {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Fi => self.finnish(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::SowingSummaryTitle => "Sowing summary",
            Self::PlantingSummaryTitle => "Planting summary",
            Self::HarvestSummaryTitle => "Harvest summary",
            Self::PackingSummaryTitle => "Packing summary",
            Self::YieldSummaryTitle => "Yield summary",
            Self::SowingWorkHoursTitle => "Sowing work hours",
            Self::PlantingWorkHoursTitle => "Planting work hours",
            Self::HarvestWorkHoursTitle => "Harvest work hours",
            Self::PackingWorkHoursTitle => "Packing work hours",
            Self::SowingWorkHourSummaryTitle => "Sowing work hour summary",
            Self::PlantingWorkHourSummaryTitle => "Planting work hour summary",
            Self::HarvestWorkHourSummaryTitle => "Harvest work hour summary",
            Self::PackingWorkHourSummaryTitle => "Packing work hour summary",
            Self::PlantingListTitle => "Planting list",
            Self::HarvestListTitle => "Harvest list",
            Self::PackingListTitle => "Packing list",
            Self::WastageTitle => "Wastage",
            Self::SowedTitle => "Sowed",
            Self::SpreadTitle => "Spread",
            Self::PlantedTitle => "Planted",
            Self::HarvestedTitle => "Harvested",
            Self::PackedTitle => "Packed",
            Self::ProductPhaseCountTitle => "Product phase counts",
            Self::CultivationSummaryTitle => "Summary",
            Self::YieldTitle => "Yield",
            Self::PlantingYieldTitle => "Planting yield",
            Self::GrowthTimeTitle => "Growth time",
            Self::SeedlingTimeTitle => "Seedling time",
            Self::Total => "Total",
            Self::Combined => "Combined",
            Self::Product => "Product",
            Self::Amount => "Amount",
            Self::GutterCount => "Gutters",
            Self::CartCount => "Carts",
            Self::TableCount => "Tables",
            Self::YieldKg => "Yield (kg)",
            Self::BasketCount => "Baskets",
            Self::Bags => "Bags",
            Self::Boxes => "Boxes",
            Self::HarvestedBaskets => "Harvested baskets",
            Self::Wastage => "Wastage",
            Self::Packed => "Packed",
            Self::PackedFromHarvested => "Packed of harvested",
            Self::PackedFromNetHarvested => "Packed of harvested minus wastage",
            Self::SowingDate => "Sowing date",
            Self::PlantingDate => "Planting date",
            Self::HarvestDate => "Harvest date",
            Self::PackingDate => "Packing date",
            Self::Duration => "Duration",
            Self::AmountPerHour => "Amount / h",
            Self::CartsPerHour => "Carts / h",
            Self::TablesPerHour => "Tables / h",
            Self::YieldPerHour => "Yield (kg) / h",
            Self::BagsPerHour => "Bags / h",
            Self::BoxesPerHour => "Boxes / h",
            Self::Line => "Line",
            Self::SaplingDays => "Sapling time (days)",
            Self::GrowthDays => "Growth time (days)",
            Self::KgPerTable => "Kg / table",
            Self::GramsPerUnit => "Grams / unit",
            Self::KgPerBasket => "Kg / basket",
            Self::CuttingHeight => "Cutting height",
            Self::TotalRawMaterials => "Raw materials total",
            Self::WastageDate => "Date",
            Self::Worker => "Worker",
            Self::Phase => "Phase",
            Self::WastageReason => "Reason",
            Self::AdditionalInformation => "Additional information",
            Self::HarvestedUnits => "Harvested units",
            Self::UnitsInGutters => "In gutters",
            Self::UnitsFromCells => "From cells",
            Self::YieldPercentage => "Yield %",
            Self::AverageWeight => "Average weight",
            Self::Missing => "Missing",
        }
    }

    fn finnish(self) -> &'static str {
        match self {
            Self::SowingSummaryTitle => "Kylvöyhteenveto",
            Self::PlantingSummaryTitle => "Istutusyhteenveto",
            Self::HarvestSummaryTitle => "Sadonkorjuuyhteenveto",
            Self::PackingSummaryTitle => "Pakkausyhteenveto",
            Self::YieldSummaryTitle => "Satoyhteenveto",
            Self::SowingWorkHoursTitle => "Kylvön työtunnit",
            Self::PlantingWorkHoursTitle => "Istutuksen työtunnit",
            Self::HarvestWorkHoursTitle => "Sadonkorjuun työtunnit",
            Self::PackingWorkHoursTitle => "Pakkauksen työtunnit",
            Self::SowingWorkHourSummaryTitle => "Kylvön työtuntiyhteenveto",
            Self::PlantingWorkHourSummaryTitle => "Istutuksen työtuntiyhteenveto",
            Self::HarvestWorkHourSummaryTitle => "Sadonkorjuun työtuntiyhteenveto",
            Self::PackingWorkHourSummaryTitle => "Pakkauksen työtuntiyhteenveto",
            Self::PlantingListTitle => "Istutuslista",
            Self::HarvestListTitle => "Sadonkorjuulista",
            Self::PackingListTitle => "Pakkauslista",
            Self::WastageTitle => "Hävikki",
            Self::SowedTitle => "Kylvetty",
            Self::SpreadTitle => "Levitetty",
            Self::PlantedTitle => "Istutettu",
            Self::HarvestedTitle => "Korjattu",
            Self::PackedTitle => "Pakattu",
            Self::ProductPhaseCountTitle => "Tuotteiden vaihemäärät",
            Self::CultivationSummaryTitle => "Yhteenveto",
            Self::YieldTitle => "Saanto",
            Self::PlantingYieldTitle => "Istutussaanto",
            Self::GrowthTimeTitle => "Kasvuaika",
            Self::SeedlingTimeTitle => "Taimiaika",
            Self::Total => "Yhteensä",
            Self::Combined => "Yhdistetty",
            Self::Product => "Tuote",
            Self::Amount => "Määrä",
            Self::GutterCount => "Kourut",
            Self::CartCount => "Kärryt",
            Self::TableCount => "Pöydät",
            Self::YieldKg => "Sato (kg)",
            Self::BasketCount => "Korit",
            Self::Bags => "Pussit",
            Self::Boxes => "Laatikot",
            Self::HarvestedBaskets => "Kerätyt korit",
            Self::Wastage => "Hävikki",
            Self::Packed => "Pakattu",
            Self::PackedFromHarvested => "Pakattu kerätystä",
            Self::PackedFromNetHarvested => "Pakattu kerätystä hävikki vähennettynä",
            Self::SowingDate => "Kylvöpäivä",
            Self::PlantingDate => "Istutuspäivä",
            Self::HarvestDate => "Korjuupäivä",
            Self::PackingDate => "Pakkauspäivä",
            Self::Duration => "Kesto",
            Self::AmountPerHour => "Määrä / h",
            Self::CartsPerHour => "Kärryt / h",
            Self::TablesPerHour => "Pöydät / h",
            Self::YieldPerHour => "Sato (kg) / h",
            Self::BagsPerHour => "Pussit / h",
            Self::BoxesPerHour => "Laatikot / h",
            Self::Line => "Linja",
            Self::SaplingDays => "Taimiaika (vrk)",
            Self::GrowthDays => "Kasvuaika (vrk)",
            Self::KgPerTable => "Kg / pöytä",
            Self::GramsPerUnit => "Grammaa / kpl",
            Self::KgPerBasket => "Kg / kori",
            Self::CuttingHeight => "Leikkuukorkeus",
            Self::TotalRawMaterials => "Raaka-aineet yhteensä",
            Self::WastageDate => "Päivämäärä",
            Self::Worker => "Työntekijä",
            Self::Phase => "Vaihe",
            Self::WastageReason => "Syy",
            Self::AdditionalInformation => "Lisätiedot",
            Self::HarvestedUnits => "Korjatut kpl",
            Self::UnitsInGutters => "Kouruissa",
            Self::UnitsFromCells => "Kennoista",
            Self::YieldPercentage => "Saanto %",
            Self::AverageWeight => "Keskipaino",
            Self::Missing => "Tieto puuttuu",
        }
    }
}

/// Format a timestamp as a report date (`dd.MM.yyyy`) in `offset`.
pub fn format_date(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format(DATE_FORMAT).to_string()
}

/// Format a timestamp as a report date-time (`dd.MM.yyyy HH:mm`) in `offset`.
pub fn format_date_time(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format(DATE_TIME_FORMAT).to_string()
}

/// The second row of every spreadsheet report.
pub fn date_range(locale: Locale, from: Timestamp, to: Timestamp, offset: FixedOffset) -> String {
    let (from, to) = (format_date(from, offset), format_date(to, offset));
    match locale {
        Locale::En => format!("Between {from} - {to}"),
        Locale::Fi => format!("Aikaväli {from} - {to}"),
    }
}
