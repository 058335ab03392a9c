//! Drawing units
//!
//! Excellon data is either metric (mm) or imperial (inch). The editor does
//! not convert between the two; the unit only travels with documents so a
//! round-trip keeps its meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement unit of a drill document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters
    #[default]
    Mm,
    /// Inches
    Inch,
}

impl Units {
    /// Millimeters per unit.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            Self::Mm => 1.0,
            Self::Inch => 25.4,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm => write!(f, "mm"),
            Self::Inch => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "metric" => Ok(Self::Mm),
            "in" | "inch" | "imperial" => Ok(Self::Inch),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}
