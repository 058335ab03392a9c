//! Drill and slot shapes
//!
//! A drill is stored as a cross marker, two perpendicular segments as long as
//! the tool is wide. A slot is stored only as its outline polygon; the
//! parameters it was built from are not kept.

use crate::kernel::{GeometryKernel, PlanarKernel};
use exckit_core::{Bounds, Point, Segment};
use serde::{Deserialize, Serialize};

/// Cross marker for a drilled hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillShape {
    /// Horizontal then vertical segment
    pub segments: [Segment; 2],
}

impl DrillShape {
    /// Crossing point of the two segments.
    pub fn center(&self) -> Point {
        self.segments[0].midpoint()
    }

    /// Marker size, the length of the horizontal segment.
    pub fn size(&self) -> f64 {
        self.segments[0].length()
    }

    pub fn points(&self) -> [Point; 4] {
        [
            self.segments[0].start,
            self.segments[0].end,
            self.segments[1].start,
            self.segments[1].end,
        ]
    }

    fn from_points(points: &[Point]) -> Self {
        Self {
            segments: [
                Segment::new(points[0], points[1]),
                Segment::new(points[2], points[3]),
            ],
        }
    }

    pub fn bounds(&self) -> Bounds {
        let [a, b, c, d] = self.points();
        Bounds::from_points(&[a, b, c, d]).unwrap_or_else(|| Bounds::new(a.x, a.y, a.x, a.y))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::from_points(&PlanarKernel.translate(&self.points(), dx, dy))
    }

    /// Scales both segments about the center.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_points(&PlanarKernel.scale(&self.points(), self.center(), factor))
    }
}

/// Stadium outline of a milled slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotShape {
    /// Closed ring, no repeated closing vertex
    pub outline: Vec<Point>,
}

impl SlotShape {
    pub fn new(outline: Vec<Point>) -> Self {
        Self { outline }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.outline).unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(PlanarKernel.translate(&self.outline, dx, dy))
    }

    /// Rotates counter-clockwise by `angle` radians about `origin`.
    pub fn rotated(&self, origin: Point, angle: f64) -> Self {
        Self::new(PlanarKernel.rotate(&self.outline, origin, angle))
    }

    /// Area centroid, falling back to the bounding box center for a
    /// degenerate outline.
    pub fn center(&self) -> Point {
        PlanarKernel
            .centroid(&self.outline)
            .unwrap_or_else(|| self.bounds().center())
    }
}

/// Any shape held by the tool table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExcShape {
    Drill(DrillShape),
    Slot(SlotShape),
}

impl ExcShape {
    pub fn bounds(&self) -> Bounds {
        match self {
            ExcShape::Drill(d) => d.bounds(),
            ExcShape::Slot(s) => s.bounds(),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            ExcShape::Drill(d) => d.center(),
            ExcShape::Slot(s) => s.center(),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        match self {
            ExcShape::Drill(d) => ExcShape::Drill(d.translated(dx, dy)),
            ExcShape::Slot(s) => ExcShape::Slot(s.translated(dx, dy)),
        }
    }

    pub fn is_drill(&self) -> bool {
        matches!(self, ExcShape::Drill(_))
    }

    pub fn is_slot(&self) -> bool {
        matches!(self, ExcShape::Slot(_))
    }
}

impl From<DrillShape> for ExcShape {
    fn from(d: DrillShape) -> Self {
        ExcShape::Drill(d)
    }
}

impl From<SlotShape> for ExcShape {
    fn from(s: SlotShape) -> Self {
        ExcShape::Slot(s)
    }
}
