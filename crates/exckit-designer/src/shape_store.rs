//! Shape storage keyed by tool diameter
//!
//! The store owns every placed shape. Shapes are grouped into per-tool
//! buckets ordered by diameter and carry a store-wide unique id. Bounding
//! boxes are computed once on insert and used for nearest and region
//! queries.

use crate::shape::ExcShape;
use exckit_core::{Bounds, Point, ToolDiameter};
use std::collections::BTreeMap;

/// Identifier of a stored shape, unique for the lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

/// A shape together with its id and cached bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredShape {
    pub id: ShapeId,
    pub shape: ExcShape,
    pub bounds: Bounds,
}

/// Per-tool drill and slot counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolCounts {
    pub drills: usize,
    pub slots: usize,
}

/// Tool table: ordered map from diameter to the shapes cut with it.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    tools: BTreeMap<ToolDiameter, Vec<StoredShape>>,
    next_id: u64,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId(self.next_id)
    }

    /// Adds a shape to the bucket of `tool`, creating the bucket if needed.
    pub fn insert(&mut self, tool: ToolDiameter, shape: ExcShape) -> ShapeId {
        let id = self.generate_id();
        let bounds = shape.bounds();
        self.tools
            .entry(tool)
            .or_default()
            .push(StoredShape { id, shape, bounds });
        id
    }

    /// Adds several shapes to one bucket, returning their ids in order.
    ///
    /// Callers build the complete batch before inserting, so a failed
    /// construction never leaves a partial batch behind.
    pub fn insert_all<I>(&mut self, tool: ToolDiameter, shapes: I) -> Vec<ShapeId>
    where
        I: IntoIterator<Item = ExcShape>,
    {
        shapes
            .into_iter()
            .map(|shape| self.insert(tool, shape))
            .collect()
    }

    /// Removes a shape, returning its tool and geometry.
    pub fn remove(&mut self, id: ShapeId) -> Option<(ToolDiameter, ExcShape)> {
        for (tool, shapes) in self.tools.iter_mut() {
            if let Some(pos) = shapes.iter().position(|s| s.id == id) {
                let stored = shapes.remove(pos);
                return Some((*tool, stored.shape));
            }
        }
        None
    }

    pub fn get(&self, id: ShapeId) -> Option<(ToolDiameter, &StoredShape)> {
        self.iter().find(|(_, s)| s.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// All shapes, ascending by diameter, insertion order within a tool.
    pub fn iter(&self) -> impl Iterator<Item = (ToolDiameter, &StoredShape)> {
        self.tools
            .iter()
            .flat_map(|(tool, shapes)| shapes.iter().map(move |s| (*tool, s)))
    }

    /// Shape whose bounding box is closest to `point`.
    ///
    /// Ties keep the first shape in iteration order.
    pub fn nearest(&self, point: &Point) -> Option<(ToolDiameter, &StoredShape, f64)> {
        let mut best: Option<(ToolDiameter, &StoredShape, f64)> = None;
        for (tool, stored) in self.iter() {
            let distance = stored.bounds.distance_to_point(point);
            if best.map_or(true, |(_, _, d)| distance < d) {
                best = Some((tool, stored, distance));
            }
        }
        best
    }

    /// Ids of all shapes whose bounding box intersects `region`.
    pub fn query_region(&self, region: &Bounds) -> Vec<ShapeId> {
        self.iter()
            .filter(|(_, s)| s.bounds.intersects(region))
            .map(|(_, s)| s.id)
            .collect()
    }

    /// Diameters in ascending order, empty buckets included.
    pub fn tools(&self) -> impl Iterator<Item = ToolDiameter> + '_ {
        self.tools.keys().copied()
    }

    pub fn has_tool(&self, tool: ToolDiameter) -> bool {
        self.tools.contains_key(&tool)
    }

    pub fn shapes(&self, tool: ToolDiameter) -> &[StoredShape] {
        self.tools.get(&tool).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn counts(&self, tool: ToolDiameter) -> ToolCounts {
        self.shapes(tool)
            .iter()
            .fold(ToolCounts::default(), |mut acc, s| {
                if s.shape.is_drill() {
                    acc.drills += 1;
                } else {
                    acc.slots += 1;
                }
                acc
            })
    }

    /// Creates an empty bucket. Returns `false` if it already existed.
    pub(crate) fn create_tool(&mut self, tool: ToolDiameter) -> bool {
        if self.tools.contains_key(&tool) {
            return false;
        }
        self.tools.insert(tool, Vec::new());
        true
    }

    /// Removes a bucket with all its shapes.
    pub(crate) fn take_tool(&mut self, tool: ToolDiameter) -> Option<Vec<StoredShape>> {
        self.tools.remove(&tool)
    }

    /// Drops buckets left without shapes, returning their diameters.
    pub fn prune_empty(&mut self) -> Vec<ToolDiameter> {
        let empty: Vec<ToolDiameter> = self
            .tools
            .iter()
            .filter(|(_, shapes)| shapes.is_empty())
            .map(|(tool, _)| *tool)
            .collect();
        for tool in &empty {
            self.tools.remove(tool);
        }
        empty
    }

    /// Number of shapes across all tools.
    pub fn len(&self) -> usize {
        self.tools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}
