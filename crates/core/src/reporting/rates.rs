//! Per-hour rates and percentage ratios derived from accumulated totals.

use super::accumulate::AggregationRow;

const MINUTES_PER_HOUR: i64 = 60;

/// Convert minutes to fractional hours. A zero duration counts as one hour
/// so per-hour rates never divide by zero.
pub fn duration_hours(minutes: i64) -> f64 {
    let hours = (minutes / MINUTES_PER_HOUR) as f64
        + (minutes % MINUTES_PER_HOUR) as f64 / MINUTES_PER_HOUR as f64;
    if hours == 0.0 {
        1.0
    } else {
        hours
    }
}

/// `total` per hour over `minutes`.
pub fn per_hour(total: f64, minutes: i64) -> f64 {
    total / duration_hours(minutes)
}

/// Render minutes as `H:MM`.
pub fn format_duration(minutes: i64) -> String {
    format!("{}:{:02}", minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// A quotient whose denominator may be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Defined(f64),
    /// The denominator was zero.
    Undefined,
}

impl Ratio {
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Self::Undefined
        } else {
            Self::Defined(numerator / denominator)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// `ratio * 100` with two decimals and a trailing `%`.
    pub fn percent(self) -> Option<String> {
        self.value().map(|v| format!("{:.2}%", v * 100.0))
    }
}

/// Packed packages relative to harvested baskets.
pub fn packed_from_harvested(row: &AggregationRow) -> Ratio {
    Ratio::of(row.packing_amount as f64, row.basket_count as f64)
}

/// Packed packages relative to harvested baskets minus wastage.
pub fn packed_from_net_harvested(row: &AggregationRow) -> Ratio {
    Ratio::of(
        row.packing_amount as f64,
        (row.basket_count - row.wastage_amount) as f64,
    )
}
