//! # Resize Engine
//!
//! Rescales drills and rebuilds slots at a new tool diameter.
//!
//! A drill marker is scaled about its center. A slot is stored only as its
//! outline, so its axis has to be recovered from the polygon: a probe line
//! through the centroid is swept through every whole degree and the longest
//! chord it cuts from the outline is taken as the slot axis (the medial
//! chord, tip to tip). The chord is then shortened by the new radius at both
//! ends and buffered by that radius, which keeps the overall slot length and
//! orientation.

use crate::kernel::{GeometryKernel, PlanarKernel};
use crate::shape::{DrillShape, ExcShape, SlotShape};
use exckit_core::{GeometryError, GeometryResult, Point, Segment};
use tracing::debug;

/// Probe rotations tried, in whole degrees.
const SWEEP_DEGREES: std::ops::RangeInclusive<u32> = 0..=359;

/// Chords no longer than this (after trimming) collapse to a disk.
const LENGTH_EPSILON: f64 = 1e-9;

/// Chords whose lengths differ by less than this are tied.
const TIE_EPSILON: f64 = 1e-9;

/// Result of the chord search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedialChord {
    /// Probe rotation that produced the chord, degrees CCW
    pub angle_deg: u32,
    /// Tip-to-tip chord
    pub chord: Segment,
}

impl MedialChord {
    pub fn length(&self) -> f64 {
        self.chord.length()
    }

    /// End-cap centers of a slot of `diameter` spanning this chord.
    ///
    /// `None` when the chord is too short to hold two separate caps.
    pub fn cap_centers(&self, diameter: f64) -> Option<Segment> {
        trim_segment(&self.chord, diameter / 2.0)
    }
}

/// Resize engine over a geometry kernel.
#[derive(Debug, Clone)]
pub struct ResizeEngine<K: GeometryKernel = PlanarKernel> {
    kernel: K,
    steps_per_circle: u32,
}

impl ResizeEngine<PlanarKernel> {
    pub fn new(steps_per_circle: u32) -> Self {
        Self::with_kernel(PlanarKernel, steps_per_circle)
    }
}

impl<K: GeometryKernel> ResizeEngine<K> {
    pub fn with_kernel(kernel: K, steps_per_circle: u32) -> Self {
        Self {
            kernel,
            steps_per_circle,
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Scales a drill marker by `new_diameter / old_diameter` about its center.
    pub fn resize_drill(
        &self,
        shape: &DrillShape,
        old_diameter: f64,
        new_diameter: f64,
    ) -> GeometryResult<DrillShape> {
        check_diameter(new_diameter)?;
        if !(old_diameter > 0.0) {
            return Err(GeometryError::invalid_resize(format!(
                "current drill diameter must be positive, got {old_diameter}"
            )));
        }
        let factor = new_diameter / old_diameter;
        let pts = self.kernel.scale(&shape.points(), shape.center(), factor);
        Ok(DrillShape {
            segments: [Segment::new(pts[0], pts[1]), Segment::new(pts[2], pts[3])],
        })
    }

    /// Finds the longest chord of `ring` through its centroid.
    ///
    /// The probe runs along the bounding-box diagonal and is long enough to
    /// cross the whole polygon at any rotation. Ties keep the smallest angle;
    /// lengths within rounding noise of each other count as tied.
    pub fn medial_chord(&self, ring: &[Point]) -> GeometryResult<MedialChord> {
        if ring.len() < 3 || self.kernel.area(ring) <= f64::EPSILON {
            return Err(GeometryError::degenerate(format!(
                "slot outline with {} vertices has no area",
                ring.len()
            )));
        }
        let center = self
            .kernel
            .centroid(ring)
            .ok_or_else(|| GeometryError::degenerate("slot outline has no centroid"))?;
        let bounds = self
            .kernel
            .bounds(ring)
            .ok_or_else(|| GeometryError::degenerate("slot outline has no bounds"))?;

        let half_length = bounds
            .corners()
            .iter()
            .map(|c| c.distance_to(&center))
            .fold(0.0, f64::max)
            * 1.01;
        let (w, h) = (bounds.width(), bounds.height());
        let diagonal = (w * w + h * h).sqrt();
        let (ux, uy) = (w / diagonal, h / diagonal);
        let probe = [
            center.offset(-ux * half_length, -uy * half_length),
            center.offset(ux * half_length, uy * half_length),
        ];

        let mut best: Option<MedialChord> = None;
        for deg in SWEEP_DEGREES {
            let rotated = self
                .kernel
                .rotate(&probe, center, (deg as f64).to_radians());
            let Some(chord) = self
                .kernel
                .clip_segment(ring, &Segment::new(rotated[0], rotated[1]))
            else {
                continue;
            };
            if best.map_or(true, |b| chord.length() > b.chord.length() + TIE_EPSILON) {
                best = Some(MedialChord {
                    angle_deg: deg,
                    chord,
                });
            }
        }

        let best = best.ok_or_else(|| {
            GeometryError::degenerate("no probe rotation intersects the slot outline")
        })?;
        debug!(
            angle_deg = best.angle_deg,
            length = best.length(),
            "Recovered slot medial chord"
        );
        Ok(best)
    }

    /// Rebuilds a slot at `new_diameter`, keeping its length and orientation.
    pub fn resize_slot(&self, shape: &SlotShape, new_diameter: f64) -> GeometryResult<SlotShape> {
        check_diameter(new_diameter)?;
        let medial = self.medial_chord(&shape.outline)?;
        Ok(self.slot_from_tips(&medial.chord, new_diameter))
    }

    /// Slot whose caps touch both ends of `tips`.
    ///
    /// When `tips` is not longer than the diameter the result is a disk
    /// around the chord midpoint.
    pub fn slot_from_tips(&self, tips: &Segment, diameter: f64) -> SlotShape {
        let radius = diameter / 2.0;
        let centers = trim_segment(tips, radius).unwrap_or_else(|| {
            let mid = tips.midpoint();
            Segment::new(mid, mid)
        });
        self.slot_from_centers(&centers, diameter)
    }

    /// Slot milled by a tool of `diameter` moving along `centers`.
    pub fn slot_from_centers(&self, centers: &Segment, diameter: f64) -> SlotShape {
        SlotShape::new(self.kernel.buffer_segment(
            centers,
            diameter / 2.0,
            self.steps_per_circle,
        ))
    }

    /// Resizes either kind of shape from `old_diameter` to `new_diameter`.
    pub fn resize(
        &self,
        shape: &ExcShape,
        old_diameter: f64,
        new_diameter: f64,
    ) -> GeometryResult<ExcShape> {
        match shape {
            ExcShape::Drill(d) => Ok(ExcShape::Drill(self.resize_drill(
                d,
                old_diameter,
                new_diameter,
            )?)),
            ExcShape::Slot(s) => Ok(ExcShape::Slot(self.resize_slot(s, new_diameter)?)),
        }
    }
}

impl Default for ResizeEngine<PlanarKernel> {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Scales a drill with the default kernel.
pub fn resize_drill(
    shape: &DrillShape,
    old_diameter: f64,
    new_diameter: f64,
) -> GeometryResult<DrillShape> {
    ResizeEngine::default().resize_drill(shape, old_diameter, new_diameter)
}

/// Rebuilds a slot with the default kernel.
pub fn resize_slot(
    shape: &SlotShape,
    new_diameter: f64,
    steps_per_circle: u32,
) -> GeometryResult<SlotShape> {
    ResizeEngine::new(steps_per_circle).resize_slot(shape, new_diameter)
}

fn check_diameter(diameter: f64) -> GeometryResult<()> {
    if !(diameter > 0.0) || !diameter.is_finite() {
        return Err(GeometryError::invalid_resize(format!(
            "target diameter must be positive, got {diameter}"
        )));
    }
    Ok(())
}

/// Removes `amount` from both ends of `segment`, `None` if nothing remains.
fn trim_segment(segment: &Segment, amount: f64) -> Option<Segment> {
    let length = segment.length();
    if length - 2.0 * amount <= LENGTH_EPSILON {
        return None;
    }
    let ux = (segment.end.x - segment.start.x) / length;
    let uy = (segment.end.y - segment.start.y) / length;
    Some(Segment::new(
        segment.start.offset(ux * amount, uy * amount),
        segment.end.offset(-ux * amount, -uy * amount),
    ))
}
