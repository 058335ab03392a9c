//! Tool diameter keys.
//!
//! Tool tables group shapes by drill bit size. Floating point values make
//! poor map keys, so a diameter is rounded once, to a fixed number of
//! decimals, and stored as an integer count of `10^-decimals` units.
//! Two diameters name the same tool iff they are equal at the finest
//! supported precision, so keys rounded at different precisions still
//! compare and order by value.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Largest supported rounding precision.
pub const MAX_DECIMALS: u32 = 9;

/// A positive tool diameter rounded to a fixed number of decimals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToolDiameter {
    scaled: i64,
    decimals: u32,
}

impl ToolDiameter {
    /// Rounds `value` half away from zero to `decimals` places.
    ///
    /// Fails with `InvalidGeometry` for non-finite or non-positive values,
    /// and for values that round to zero at this precision.
    pub fn new(value: f64, decimals: u32) -> GeometryResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(GeometryError::invalid(format!(
                "tool diameter must be positive, got {value}"
            )));
        }
        let decimals = decimals.min(MAX_DECIMALS);
        let scaled = (value * Self::factor(decimals)).round();
        if scaled < 1.0 {
            return Err(GeometryError::invalid(format!(
                "tool diameter {value} rounds to zero at {decimals} decimals"
            )));
        }
        if scaled > i64::MAX as f64 {
            return Err(GeometryError::invalid(format!(
                "tool diameter {value} is out of range"
            )));
        }
        Ok(Self {
            scaled: scaled as i64,
            decimals,
        })
    }

    /// The rounded diameter as a float.
    pub fn value(&self) -> f64 {
        self.scaled as f64 / Self::factor(self.decimals)
    }

    pub fn radius(&self) -> f64 {
        self.value() / 2.0
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    fn factor(decimals: u32) -> f64 {
        10f64.powi(decimals as i32)
    }

    /// Count of `10^-MAX_DECIMALS` units.
    fn key(&self) -> i128 {
        let shift = MAX_DECIMALS.saturating_sub(self.decimals);
        i128::from(self.scaled) * 10i128.pow(shift)
    }
}

impl PartialEq for ToolDiameter {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ToolDiameter {}

impl PartialOrd for ToolDiameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolDiameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for ToolDiameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ToolDiameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.decimals as usize, self.value())
    }
}
