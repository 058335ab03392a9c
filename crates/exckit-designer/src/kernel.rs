//! Planar geometry kernel
//!
//! The resize engine needs a handful of polygon operations: centroid, area,
//! affine transforms, clipping a segment against a polygon and buffering a
//! segment. [`GeometryKernel`] is that narrow interface; [`PlanarKernel`]
//! implements it with `nalgebra` transforms and `cavalier_contours`
//! polylines.
//!
//! Polygons are rings: closed point lists without a repeated closing vertex.

use crate::arc::{arc, ArcDirection};
use cavalier_contours::core::math::Vector2 as PlineVector;
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use exckit_core::{Bounds, Point, Segment};
use nalgebra::{Point2, Rotation2, Translation2, Vector2};
use std::f64::consts::{FRAC_PI_2, PI};

/// Parameter tolerance along a clipped segment.
const PARAM_EPSILON: f64 = 1e-12;

/// Polygon operations consumed by the shape builders and the resize engine.
pub trait GeometryKernel {
    /// Absolute area of a ring.
    fn area(&self, ring: &[Point]) -> f64;

    /// Area centroid of a ring, `None` when the ring has no area.
    fn centroid(&self, ring: &[Point]) -> Option<Point>;

    fn bounds(&self, points: &[Point]) -> Option<Bounds>;

    /// Rotates counter-clockwise by `angle` radians about `origin`.
    fn rotate(&self, points: &[Point], origin: Point, angle: f64) -> Vec<Point>;

    fn translate(&self, points: &[Point], dx: f64, dy: f64) -> Vec<Point>;

    /// Scales uniformly by `factor` about `origin`.
    fn scale(&self, points: &[Point], origin: Point, factor: f64) -> Vec<Point>;

    /// Whether `point` lies inside the ring.
    fn contains(&self, ring: &[Point], point: Point) -> bool;

    /// Longest piece of `segment` inside the ring, or `None` if it misses.
    fn clip_segment(&self, ring: &[Point], segment: &Segment) -> Option<Segment>;

    /// Ring of all points within `radius` of `segment`: a capsule, or a disk
    /// when the segment has zero length.
    fn buffer_segment(&self, segment: &Segment, radius: f64, steps_per_circle: u32)
        -> Vec<Point>;
}

/// Default kernel backed by `nalgebra` and `cavalier_contours`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarKernel;

impl PlanarKernel {
    fn polyline(ring: &[Point]) -> Polyline<f64> {
        let mut pline = Polyline::new();
        for p in ring {
            pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        pline.set_is_closed(true);
        pline
    }

    /// Parameters along `segment` where it crosses ring edges, plus both ends.
    fn crossing_params(ring: &[Point], segment: &Segment) -> Vec<f64> {
        let s = Vector2::new(segment.start.x, segment.start.y);
        let d = Vector2::new(segment.end.x, segment.end.y) - s;
        let mut params = vec![0.0, 1.0];

        for (i, a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            let a = Vector2::new(a.x, a.y);
            let f = Vector2::new(b.x, b.y) - a;
            let denom = d.perp(&f);
            if denom.abs() < f64::EPSILON {
                continue;
            }
            let w = a - s;
            let t = w.perp(&f) / denom;
            let u = w.perp(&d) / denom;
            if (0.0..=1.0).contains(&t) && (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&u) {
                params.push(t);
            }
        }

        params.sort_by(|a, b| a.total_cmp(b));
        params.dedup_by(|a, b| (*a - *b).abs() < PARAM_EPSILON);
        params
    }
}

impl GeometryKernel for PlanarKernel {
    fn area(&self, ring: &[Point]) -> f64 {
        if ring.len() < 3 {
            return 0.0;
        }
        Self::polyline(ring).area().abs()
    }

    fn centroid(&self, ring: &[Point]) -> Option<Point> {
        if ring.len() < 3 {
            return None;
        }
        let mut twice_area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (i, p) in ring.iter().enumerate() {
            let q = ring[(i + 1) % ring.len()];
            let cross = p.x * q.y - q.x * p.y;
            twice_area += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        if twice_area.abs() < f64::EPSILON {
            return None;
        }
        Some(Point::new(cx / (3.0 * twice_area), cy / (3.0 * twice_area)))
    }

    fn bounds(&self, points: &[Point]) -> Option<Bounds> {
        Bounds::from_points(points)
    }

    fn rotate(&self, points: &[Point], origin: Point, angle: f64) -> Vec<Point> {
        let rotation = Rotation2::new(angle);
        let o: Point2<f64> = origin.into();
        points
            .iter()
            .map(|p| {
                let v = Point2::from(*p) - o;
                Point::from(o + rotation * v)
            })
            .collect()
    }

    fn translate(&self, points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
        let translation = Translation2::new(dx, dy);
        points
            .iter()
            .map(|p| Point::from(translation.transform_point(&Point2::from(*p))))
            .collect()
    }

    fn scale(&self, points: &[Point], origin: Point, factor: f64) -> Vec<Point> {
        let o: Point2<f64> = origin.into();
        points
            .iter()
            .map(|p| Point::from(o + (Point2::from(*p) - o) * factor))
            .collect()
    }

    fn contains(&self, ring: &[Point], point: Point) -> bool {
        if ring.len() < 3 {
            return false;
        }
        Self::polyline(ring).winding_number(PlineVector::new(point.x, point.y)) != 0
    }

    fn clip_segment(&self, ring: &[Point], segment: &Segment) -> Option<Segment> {
        if ring.len() < 3 {
            return None;
        }
        let params = Self::crossing_params(ring, segment);
        let at = |t: f64| {
            Point::new(
                segment.start.x + (segment.end.x - segment.start.x) * t,
                segment.start.y + (segment.end.y - segment.start.y) * t,
            )
        };

        // Inside runs, merged where consecutive pieces touch.
        let pline = Self::polyline(ring);
        let mut runs: Vec<(f64, f64)> = Vec::new();
        for pair in params.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            let mid = at((t0 + t1) / 2.0);
            if pline.winding_number(PlineVector::new(mid.x, mid.y)) == 0 {
                continue;
            }
            match runs.last_mut() {
                Some(last) if (last.1 - t0).abs() < PARAM_EPSILON => last.1 = t1,
                _ => runs.push((t0, t1)),
            }
        }

        let mut best: Option<(f64, f64)> = None;
        for run in runs {
            if best.map_or(true, |b| run.1 - run.0 > b.1 - b.0) {
                best = Some(run);
            }
        }
        best.map(|(t0, t1)| Segment::new(at(t0), at(t1)))
    }

    fn buffer_segment(
        &self,
        segment: &Segment,
        radius: f64,
        steps_per_circle: u32,
    ) -> Vec<Point> {
        let (s, e) = (segment.start, segment.end);
        if segment.length() < f64::EPSILON {
            let mut ring = arc(s, radius, 0.0, 0.0, ArcDirection::Ccw, steps_per_circle);
            ring.pop();
            return ring;
        }

        // Caps start on the right-hand side of the travel direction.
        let phi = (e.y - s.y).atan2(e.x - s.x) - FRAC_PI_2;
        let mut ring = arc(e, radius, phi, phi + PI, ArcDirection::Ccw, steps_per_circle);
        ring.extend(arc(
            s,
            radius,
            phi + PI,
            phi + 2.0 * PI,
            ArcDirection::Ccw,
            steps_per_circle,
        ));
        ring
    }
}
