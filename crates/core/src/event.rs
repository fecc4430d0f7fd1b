//! Cultivation events.
//!
//! An [`Event`] carries the columns every event shares (product, time span,
//! creator, facility) and an [`EventPayload`] variant holding the
//! type-specific data. Packings are modelled as `Packing` events so the
//! report pipeline can treat every source uniformly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::facility::Facility;
use crate::product::PackageSize;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Sowing,
    TableSpread,
    Planting,
    Harvest,
    Packing,
    Wastage,
    CultivationObservation,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sowing => "SOWING",
            Self::TableSpread => "TABLE_SPREAD",
            Self::Planting => "PLANTING",
            Self::Harvest => "HARVEST",
            Self::Packing => "PACKING",
            Self::Wastage => "WASTAGE",
            Self::CultivationObservation => "CULTIVATION_OBSERVATION",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOWING" => Ok(Self::Sowing),
            "TABLE_SPREAD" => Ok(Self::TableSpread),
            "PLANTING" => Ok(Self::Planting),
            "HARVEST" => Ok(Self::Harvest),
            "PACKING" => Ok(Self::Packing),
            "WASTAGE" => Ok(Self::Wastage),
            "CULTIVATION_OBSERVATION" => Ok(Self::CultivationObservation),
            other => Err(CoreError::Validation(format!("Unknown event type '{other}'"))),
        }
    }
}

/// A weighed basket recorded during a harvest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestBasket {
    pub weight_kg: f64,
}

/// Raw material consumed by a packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingBasket {
    pub product_id: DbId,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    Sowing {
        production_line_id: Option<DbId>,
        amount: i64,
        pot_type: Option<String>,
    },
    TableSpread {
        tray_count: i32,
    },
    Planting {
        production_line_id: DbId,
        gutter_count: i32,
        gutter_hole_count: i32,
        sowing_date: Timestamp,
        cell_count: i32,
        worker_count: i32,
    },
    Harvest {
        production_line_id: DbId,
        harvest_type: String,
        gutter_count: i32,
        gutter_hole_count: Option<i32>,
        sowing_date: Option<Timestamp>,
        cutting_height: Option<i32>,
        baskets: Vec<HarvestBasket>,
    },
    Packing {
        package_size: PackageSize,
        packed_count: i32,
        baskets: Vec<PackingBasket>,
    },
    Wastage {
        production_line_id: Option<DbId>,
        phase: EventType,
        reason: String,
        amount: i32,
        additional_information: Option<String>,
    },
    CultivationObservation {
        weight: Option<f64>,
        luminance: Option<f64>,
    },
}

impl EventPayload {
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Sowing { .. } => EventType::Sowing,
            Self::TableSpread { .. } => EventType::TableSpread,
            Self::Planting { .. } => EventType::Planting,
            Self::Harvest { .. } => EventType::Harvest,
            Self::Packing { .. } => EventType::Packing,
            Self::Wastage { .. } => EventType::Wastage,
            Self::CultivationObservation { .. } => EventType::CultivationObservation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub facility: Facility,
    pub product_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub creator_id: Uuid,
    pub payload: EventPayload,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }

    /// Production line the event took place on, when its type records one.
    pub fn production_line_id(&self) -> Option<DbId> {
        match &self.payload {
            EventPayload::Sowing {
                production_line_id, ..
            }
            | EventPayload::Wastage {
                production_line_id, ..
            } => *production_line_id,
            EventPayload::Planting {
                production_line_id, ..
            }
            | EventPayload::Harvest {
                production_line_id, ..
            } => Some(*production_line_id),
            EventPayload::TableSpread { .. }
            | EventPayload::Packing { .. }
            | EventPayload::CultivationObservation { .. } => None,
        }
    }

    /// Check that the recorded time span is not inverted.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.end_time {
            Some(end) if end < self.start_time => Err(CoreError::Validation(format!(
                "Event {} ends before it starts",
                self.id
            ))),
            _ => Ok(()),
        }
    }

    /// Absolute length of the event in whole minutes, or `None` while the
    /// event has no end time.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_minutes().abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    fn wastage(start: Timestamp, end: Option<Timestamp>) -> Event {
        Event {
            id: 1,
            facility: Facility::Juva,
            product_id: 1,
            start_time: start,
            end_time: end,
            creator_id: Uuid::nil(),
            payload: EventPayload::Wastage {
                production_line_id: None,
                phase: EventType::Harvest,
                reason: "Mould".into(),
                amount: 2,
                additional_information: None,
            },
        }
    }

    #[test]
    fn rejects_inverted_time_span() {
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let event = wastage(start, Some(start - Duration::minutes(1)));
        assert_matches!(event.validate(), Err(CoreError::Validation(_)));
        assert!(wastage(start, None).validate().is_ok());
    }

    #[test]
    fn duration_truncates_to_whole_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let event = wastage(start, Some(start + Duration::seconds(150)));
        assert_eq!(event.duration_minutes(), Some(2));
        assert_eq!(wastage(start, None).duration_minutes(), None);
    }

    #[test]
    fn event_type_round_trips_through_column_value() {
        let parsed: EventType = EventType::CultivationObservation.as_str().parse().unwrap();
        assert_eq!(parsed, EventType::CultivationObservation);
        assert_eq!(wastage(Utc::now(), None).event_type(), EventType::Wastage);
    }

    #[test]
    fn production_line_only_for_types_that_record_one() {
        let mut event = wastage(Utc::now(), None);
        assert_eq!(event.production_line_id(), None);

        event.payload = EventPayload::Harvest {
            production_line_id: 4,
            harvest_type: "BOXING".into(),
            gutter_count: 1,
            gutter_hole_count: None,
            sowing_date: None,
            cutting_height: None,
            baskets: vec![],
        };
        assert_eq!(event.production_line_id(), Some(4));

        event.payload = EventPayload::TableSpread { tray_count: 3 };
        assert_eq!(event.production_line_id(), None);
    }
}
