//! # Primitive Synthesis
//!
//! Builds drill markers and slot outlines from placement parameters.
//!
//! Slots are stadiums: a rectangle as wide as the tool, capped by two
//! semicircles. The outline is assembled axis-aligned and, for angled slots,
//! rotated as a final step.

use crate::arc::{arc, ArcDirection};
use crate::kernel::{GeometryKernel, PlanarKernel};
use crate::shape::{DrillShape, SlotShape};
use exckit_core::{GeometryError, GeometryResult, Point, Segment, SlotOrientation};
use std::f64::consts::{FRAC_PI_2, PI};

/// Distance under which consecutive outline vertices are merged.
const VERTEX_EPSILON: f64 = 1e-9;

/// Parameters of a slot placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotParams {
    pub diameter: f64,
    /// Overall length, cap tip to cap tip
    pub length: f64,
    pub orientation: SlotOrientation,
    /// Clockwise rotation in degrees, only used with `SlotOrientation::Angle`
    pub angle_deg: f64,
    /// Tessellation segments per full circle
    pub arc_steps: u32,
}

impl SlotParams {
    pub fn new(
        diameter: f64,
        length: f64,
        orientation: SlotOrientation,
        angle_deg: f64,
        arc_steps: u32,
    ) -> Self {
        debug_assert!(angle_deg.is_finite(), "angle_deg must be finite, got {angle_deg}");
        Self {
            diameter,
            length,
            orientation,
            angle_deg,
            arc_steps,
        }
    }
}

/// Builds the cross marker for a drill of `diameter` at `center`.
pub fn make_drill(center: Point, diameter: f64) -> GeometryResult<DrillShape> {
    if !(diameter > 0.0) || !diameter.is_finite() {
        return Err(GeometryError::invalid(format!(
            "drill diameter must be positive, got {diameter}"
        )));
    }
    let r = diameter / 2.0;
    Ok(DrillShape {
        segments: [
            Segment::new(center.offset(-r, 0.0), center.offset(r, 0.0)),
            Segment::new(center.offset(0.0, -r), center.offset(0.0, r)),
        ],
    })
}

/// Builds a slot outline centered at `center`.
///
/// Fails when the diameter is not positive or the slot is shorter than it is
/// wide.
pub fn make_slot(center: Point, params: &SlotParams) -> GeometryResult<SlotShape> {
    let SlotParams {
        diameter,
        length,
        orientation,
        angle_deg,
        arc_steps,
    } = *params;

    if !(diameter > 0.0) || !diameter.is_finite() {
        return Err(GeometryError::invalid(format!(
            "slot diameter must be positive, got {diameter}"
        )));
    }
    if !(length >= diameter) || !length.is_finite() {
        return Err(GeometryError::invalid(format!(
            "slot length {length} is shorter than its diameter {diameter}"
        )));
    }

    let (half_width, half_height) = match orientation {
        SlotOrientation::Y => (diameter / 2.0, length / 2.0),
        SlotOrientation::X | SlotOrientation::Angle => (length / 2.0, diameter / 2.0),
    };

    let outline = if half_height > half_width {
        vertical_stadium(center, half_width, half_height, arc_steps)
    } else {
        horizontal_stadium(center, half_width, half_height, arc_steps)
    };
    let outline = collapse_duplicates(outline);

    if orientation == SlotOrientation::Angle {
        let kernel = PlanarKernel;
        let pivot = kernel.centroid(&outline).unwrap_or(center);
        return Ok(SlotShape::new(kernel.rotate(
            &outline,
            pivot,
            -angle_deg.to_radians(),
        )));
    }

    Ok(SlotShape::new(outline))
}

/// p1, bottom cap, p2, p3, top cap, p4
fn vertical_stadium(c: Point, hw: f64, hh: f64, steps: u32) -> Vec<Point> {
    let inset = hh - hw;
    let down_center = c.offset(0.0, -inset);
    let up_center = c.offset(0.0, inset);

    let mut ring = vec![c.offset(-hw, -inset)];
    ring.extend(arc(down_center, hw, PI, 0.0, ArcDirection::Ccw, steps));
    ring.push(c.offset(hw, -inset));
    ring.push(c.offset(hw, inset));
    ring.extend(arc(up_center, hw, 0.0, PI, ArcDirection::Ccw, steps));
    ring.push(c.offset(-hw, inset));
    ring
}

/// p1, p2, right cap, p3, p4, left cap
fn horizontal_stadium(c: Point, hw: f64, hh: f64, steps: u32) -> Vec<Point> {
    let inset = hw - hh;
    let left_center = c.offset(-inset, 0.0);
    let right_center = c.offset(inset, 0.0);

    let mut ring = vec![c.offset(-inset, -hh), c.offset(inset, -hh)];
    ring.extend(arc(
        right_center,
        hh,
        3.0 * FRAC_PI_2,
        FRAC_PI_2,
        ArcDirection::Ccw,
        steps,
    ));
    ring.push(c.offset(inset, hh));
    ring.push(c.offset(-inset, hh));
    ring.extend(arc(
        left_center,
        hh,
        FRAC_PI_2,
        3.0 * FRAC_PI_2,
        ArcDirection::Ccw,
        steps,
    ));
    ring
}

/// Merges consecutive coincident vertices, including the closing one.
fn collapse_duplicates(points: Vec<Point>) -> Vec<Point> {
    let mut ring: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if ring
            .last()
            .map_or(true, |last| !last.approx_eq(&p, VERTEX_EPSILON))
        {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring[0].approx_eq(&ring[ring.len() - 1], VERTEX_EPSILON) {
        ring.pop();
    }
    ring
}
