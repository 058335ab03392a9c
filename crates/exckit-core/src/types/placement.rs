//! Placement selectors for slots and arrays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction a slot is elongated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotOrientation {
    /// Along the X axis
    #[default]
    X,
    /// Along the Y axis
    Y,
    /// Along X, then rotated clockwise by a user angle
    Angle,
}

/// Axis a linear array advances along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearAxis {
    #[default]
    X,
    Y,
    /// Along `(cos a, sin a)` for a user angle `a`
    Angle,
}

/// Winding of a circular array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayDirection {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    #[default]
    Ccw,
}

/// Array layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayKind {
    #[default]
    Linear,
    Circular,
}

impl fmt::Display for SlotOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::Angle => write!(f, "A"),
        }
    }
}

impl FromStr for SlotOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "a" | "angle" => Ok(Self::Angle),
            _ => Err(format!("Unknown slot orientation: {}", s)),
        }
    }
}

impl fmt::Display for LinearAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::Angle => write!(f, "A"),
        }
    }
}

impl FromStr for LinearAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "a" | "angle" => Ok(Self::Angle),
            _ => Err(format!("Unknown array axis: {}", s)),
        }
    }
}

impl fmt::Display for ArrayDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cw => write!(f, "CW"),
            Self::Ccw => write!(f, "CCW"),
        }
    }
}

impl FromStr for ArrayDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cw" => Ok(Self::Cw),
            "ccw" => Ok(Self::Ccw),
            _ => Err(format!("Unknown array direction: {}", s)),
        }
    }
}
