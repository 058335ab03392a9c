//! # exckit Core
//!
//! Core value types shared by every exckit crate:
//! points and bounding boxes, rounded tool diameters, the placement enums
//! used by slots and arrays, measurement units, and the geometry error
//! taxonomy returned by all shape-producing operations.

pub mod error;
pub mod types;
pub mod units;

pub use error::{GeometryError, GeometryResult};

pub use types::{
    ArrayDirection, ArrayKind, Bounds, LinearAxis, Point, Segment, SlotOrientation, ToolDiameter,
};

pub use units::Units;
