//! Production facilities. Every event, product and production line belongs
//! to exactly one facility, and reports never mix data across them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Facility {
    Joroinen,
    Juva,
}

impl Facility {
    /// Identifier used in URLs and the `facility` database column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joroinen => "JOROINEN",
            Self::Juva => "JUVA",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facility {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JOROINEN" => Ok(Self::Joroinen),
            "JUVA" => Ok(Self::Juva),
            other => Err(CoreError::Validation(format!("Unknown facility '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("juva".parse::<Facility>().unwrap(), Facility::Juva);
        assert_eq!(" Joroinen ".parse::<Facility>().unwrap(), Facility::Joroinen);
    }

    #[test]
    fn rejects_unknown_facility() {
        assert_matches!("helsinki".parse::<Facility>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn display_matches_column_value() {
        assert_eq!(Facility::Juva.to_string(), "JUVA");
    }
}
