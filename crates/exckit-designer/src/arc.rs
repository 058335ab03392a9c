//! Arc tessellation
//!
//! Approximates circular arcs by polylines. Used for slot end caps and for
//! buffering segments into capsules.

use exckit_core::Point;
use std::f64::consts::TAU;

/// Winding of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// Clockwise, angles decreasing
    Cw,
    /// Counter-clockwise, angles increasing
    Ccw,
}

/// Tessellates an arc into an ordered list of points.
///
/// Angles are in radians. The stop angle is unwrapped to lie on the requested
/// side of `start`: counter-clockwise arcs with `stop <= start` gain a full
/// turn and clockwise arcs with `stop >= start` lose one, so equal angles give
/// a full circle.
///
/// The arc gets `ceil(steps_per_circle * sweep / 2π)` segments (at least one)
/// and the result holds one point more than that: both endpoints are always
/// included.
pub fn arc(
    center: Point,
    radius: f64,
    start: f64,
    stop: f64,
    direction: ArcDirection,
    steps_per_circle: u32,
) -> Vec<Point> {
    let mut stop = stop;
    match direction {
        ArcDirection::Ccw if stop <= start => stop += TAU,
        ArcDirection::Cw if stop >= start => stop -= TAU,
        _ => {}
    }

    let sweep = stop - start;
    let steps = segment_count(sweep, steps_per_circle);
    let delta = sweep / steps as f64;

    (0..=steps)
        .map(|i| {
            let angle = start + delta * i as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn segment_count(sweep: f64, steps_per_circle: u32) -> usize {
    // Full-turn fractions like 32.000000000000004 must not round up.
    let exact = steps_per_circle as f64 * sweep.abs() / TAU;
    ((exact - 1e-9).ceil() as usize).max(1)
}
