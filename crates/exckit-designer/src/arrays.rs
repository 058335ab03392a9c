//! # Array Operations Module
//!
//! Places repeated copies of a shape along a line, around a circle or on a
//! rectangular grid.
//!
//! Supports:
//! - Linear arrays (X, Y or arbitrary-angle pitch)
//! - Circular arrays (CW/CCW angular pitch around an origin, radius and
//!   initial angle taken from a start point)
//! - Grid arrays (rows and columns, used by the copy tool)
//!
//! Every generator is all-or-nothing: if any item fails to build, the whole
//! call fails and nothing is returned.

use crate::primitives::{make_slot, SlotParams};
use crate::shape::SlotShape;
use exckit_core::{
    ArrayDirection, Bounds, GeometryError, GeometryResult, LinearAxis, Point,
};
use std::f64::consts::PI;

/// Represents different types of array operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayType {
    /// Copies along a line
    Linear,
    /// Copies around a center point
    Circular,
    /// Rows and columns
    Grid,
}

/// Parameters for linear array operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearArrayParams {
    pub axis: LinearAxis,
    /// Distance between consecutive items
    pub pitch: f64,
    /// Direction in degrees, used with `LinearAxis::Angle`
    pub angle_deg: f64,
    pub count: u32,
}

impl LinearArrayParams {
    /// Create new linear array parameters
    pub fn new(axis: LinearAxis, pitch: f64, angle_deg: f64, count: u32) -> Self {
        debug_assert!(pitch.is_finite(), "pitch must be finite, got {pitch}");
        debug_assert!(
            angle_deg.is_finite(),
            "angle_deg must be finite, got {angle_deg}"
        );
        Self {
            axis,
            pitch,
            angle_deg,
            count,
        }
    }

    /// Unit step between items, scaled by the pitch.
    pub fn step(&self) -> (f64, f64) {
        match self.axis {
            LinearAxis::X => (self.pitch, 0.0),
            LinearAxis::Y => (0.0, self.pitch),
            LinearAxis::Angle => {
                let a = self.angle_deg.to_radians();
                (self.pitch * a.cos(), self.pitch * a.sin())
            }
        }
    }

    fn validate(&self) -> GeometryResult<()> {
        if self.count == 0 {
            return Err(GeometryError::degenerate_array("array needs at least one item"));
        }
        if !self.pitch.is_finite() || !self.angle_deg.is_finite() {
            return Err(GeometryError::invalid(format!(
                "linear array pitch {} and angle {} must be finite",
                self.pitch, self.angle_deg
            )));
        }
        Ok(())
    }
}

/// Parameters for circular array operations
///
/// The radius and the initial angle are derived from where the start point
/// lies relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArrayParams {
    pub origin: Point,
    /// First item position, as clicked
    pub start_point: Point,
    pub direction: ArrayDirection,
    /// Angle between consecutive items in degrees
    pub step_deg: f64,
    pub count: u32,
}

impl CircularArrayParams {
    /// Create new circular array parameters
    pub fn new(
        origin: Point,
        start_point: Point,
        direction: ArrayDirection,
        step_deg: f64,
        count: u32,
    ) -> Self {
        debug_assert!(step_deg.is_finite(), "step_deg must be finite, got {step_deg}");
        Self {
            origin,
            start_point,
            direction,
            step_deg,
            count,
        }
    }

    /// Total sweep in degrees.
    pub fn sweep_deg(&self) -> f64 {
        self.step_deg * self.count as f64
    }

    /// Signed radius and initial angle in radians.
    ///
    /// The radius is negated for start points left of the origin and the
    /// initial angle comes from `asin` alone, so it always lies in
    /// `[-π/2, π/2]`. The sign of the radius carries the half-plane: item
    /// `i` sits at `origin + radius · (cos, sin)(initial ± i·step)`, which
    /// puts the first item on the start point in every quadrant. For left
    /// half-plane starts the initial angle is measured from the negative X
    /// axis, which is what oriented slot placement sees.
    pub fn radius_and_initial_angle(&self) -> GeometryResult<(f64, f64)> {
        let mut radius = self.start_point.distance_to(&self.origin);
        if radius == 0.0 {
            return Err(GeometryError::degenerate_array(
                "start point coincides with the array origin",
            ));
        }
        if self.start_point.x < self.origin.x {
            radius = -radius;
        }
        // Clamp only absorbs rounding, |dy| <= |radius| by construction.
        let sine = ((self.start_point.y - self.origin.y) / radius).clamp(-1.0, 1.0);
        Ok((radius, sine.asin()))
    }

    fn validate(&self) -> GeometryResult<()> {
        if self.count == 0 {
            return Err(GeometryError::degenerate_array("array needs at least one item"));
        }
        if !self.step_deg.is_finite() {
            return Err(GeometryError::invalid(format!(
                "circular array angle {} must be finite",
                self.step_deg
            )));
        }
        if self.sweep_deg() > 360.0 {
            return Err(GeometryError::ArrayOverflow {
                count: self.count,
                step_deg: self.step_deg,
            });
        }
        Ok(())
    }
}

/// One item of a circular array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularPlacement {
    pub position: Point,
    /// Orientation for items that follow the circle, radians CCW
    pub rotation: f64,
}

/// Parameters for grid array operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridArrayParams {
    /// Number of columns
    pub columns: u32,
    /// Number of rows
    pub rows: u32,
    /// Distance from one column to the next
    pub column_step: f64,
    /// Distance from one row to the next
    pub row_step: f64,
}

impl GridArrayParams {
    /// Create new grid array parameters
    pub fn new(columns: u32, rows: u32, column_step: f64, row_step: f64) -> Self {
        debug_assert!(
            column_step.is_finite(),
            "column_step must be finite, got {column_step}"
        );
        debug_assert!(row_step.is_finite(), "row_step must be finite, got {row_step}");
        Self {
            columns,
            rows,
            column_step,
            row_step,
        }
    }

    /// Grid whose cells are the size of `bounds` plus a gap.
    pub fn with_spacing(
        columns: u32,
        rows: u32,
        bounds: &Bounds,
        column_gap: f64,
        row_gap: f64,
    ) -> Self {
        Self::new(
            columns,
            rows,
            bounds.width() + column_gap,
            bounds.height() + row_gap,
        )
    }

    /// Get total number of copies, saturating at `u32::MAX`
    pub fn total_copies(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    fn validate(&self) -> GeometryResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(GeometryError::degenerate_array(format!(
                "grid needs at least one row and column, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.columns.checked_mul(self.rows).is_none() {
            return Err(GeometryError::degenerate_array(format!(
                "grid of {}x{} copies is too large",
                self.columns, self.rows
            )));
        }
        if !self.column_step.is_finite() || !self.row_step.is_finite() {
            return Err(GeometryError::invalid("grid steps must be finite"));
        }
        Ok(())
    }
}

/// Main array operation combining type and parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayOperation {
    Linear(LinearArrayParams),
    Circular(CircularArrayParams),
    Grid(GridArrayParams),
}

impl ArrayOperation {
    /// Get the array type
    pub fn array_type(&self) -> ArrayType {
        match self {
            ArrayOperation::Linear(_) => ArrayType::Linear,
            ArrayOperation::Circular(_) => ArrayType::Circular,
            ArrayOperation::Grid(_) => ArrayType::Grid,
        }
    }

    /// Get total number of copies
    pub fn total_copies(&self) -> u32 {
        match self {
            ArrayOperation::Linear(params) => params.count,
            ArrayOperation::Circular(params) => params.count,
            ArrayOperation::Grid(params) => params.total_copies(),
        }
    }
}

/// Generator for array copies
pub struct ArrayGenerator;

impl ArrayGenerator {
    /// Offsets of a linear array, index order, first item at `(0, 0)`.
    pub fn linear_offsets(params: &LinearArrayParams) -> GeometryResult<Vec<(f64, f64)>> {
        params.validate()?;
        let (sx, sy) = params.step();
        Ok((0..params.count)
            .map(|i| (sx * i as f64, sy * i as f64))
            .collect())
    }

    /// Positions and item orientations of a circular array.
    ///
    /// The sweep is checked before the radius, so an overflowing array is
    /// reported as such even when its start point is degenerate.
    pub fn circular_placements(
        params: &CircularArrayParams,
    ) -> GeometryResult<Vec<CircularPlacement>> {
        params.validate()?;
        let (radius, initial) = params.radius_and_initial_angle()?;

        Ok((0..params.count)
            .map(|i| {
                let a = (params.step_deg * i as f64).to_radians();
                let (theta, rotation) = match params.direction {
                    ArrayDirection::Cw => (-a + initial, PI - a + initial),
                    ArrayDirection::Ccw => (a + initial, a + initial - PI),
                };
                CircularPlacement {
                    position: params
                        .origin
                        .offset(radius * theta.cos(), radius * theta.sin()),
                    rotation,
                }
            })
            .collect())
    }

    /// Offsets of a grid array, row by row, first cell at `(0, 0)`.
    pub fn grid_offsets(params: &GridArrayParams) -> GeometryResult<Vec<(f64, f64)>> {
        params.validate()?;
        let mut offsets = Vec::with_capacity(params.total_copies() as usize);
        for row in 0..params.rows {
            for col in 0..params.columns {
                offsets.push((
                    col as f64 * params.column_step,
                    row as f64 * params.row_step,
                ));
            }
        }
        Ok(offsets)
    }

    /// Offsets for any array operation.
    ///
    /// Circular offsets are relative to the array origin, so translating a
    /// shape placed at the origin by each offset lays out the circle.
    pub fn offsets(operation: &ArrayOperation) -> GeometryResult<Vec<(f64, f64)>> {
        match operation {
            ArrayOperation::Linear(params) => Self::linear_offsets(params),
            ArrayOperation::Circular(params) => Ok(Self::circular_placements(params)?
                .into_iter()
                .map(|p| (p.position.x - params.origin.x, p.position.y - params.origin.y))
                .collect()),
            ArrayOperation::Grid(params) => Self::grid_offsets(params),
        }
    }
}

/// Builds one shape per linear array item with `factory`.
pub fn linear_array<S, F>(
    mut factory: F,
    origin: Point,
    params: &LinearArrayParams,
) -> GeometryResult<Vec<S>>
where
    F: FnMut(Point) -> GeometryResult<S>,
{
    ArrayGenerator::linear_offsets(params)?
        .into_iter()
        .map(|(dx, dy)| factory(origin.offset(dx, dy)))
        .collect()
}

/// Builds one shape per circular array item with `factory`.
pub fn circular_array<S, F>(mut factory: F, params: &CircularArrayParams) -> GeometryResult<Vec<S>>
where
    F: FnMut(Point) -> GeometryResult<S>,
{
    ArrayGenerator::circular_placements(params)?
        .into_iter()
        .map(|p| factory(p.position))
        .collect()
}

/// Circular slot array whose slots follow the circle.
///
/// Each slot is built at its position and then rotated about its own center
/// by the placement rotation.
pub fn circular_slot_array(
    slot: &SlotParams,
    params: &CircularArrayParams,
) -> GeometryResult<Vec<SlotShape>> {
    ArrayGenerator::circular_placements(params)?
        .into_iter()
        .map(|p| {
            let shape = make_slot(p.position, slot)?;
            let pivot = shape.bounds().center();
            Ok(shape.rotated(pivot, p.rotation))
        })
        .collect()
}
