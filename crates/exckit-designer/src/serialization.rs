//! Serialization and deserialization of drill documents.
//!
//! A document lists the tool table in JSON: per tool its diameter, the
//! drill centers and, for each slot, the centers of its two end caps. Slot
//! outlines are not stored. They are recovered through the medial chord on
//! save and rebuilt by buffering the cap line on load.

use crate::editor::ExcEditor;
use crate::error::EditorResult;
use crate::primitives::make_drill;
use crate::resize::ResizeEngine;
use crate::shape::ExcShape;
use crate::shape_store::ShapeStore;
use chrono::{DateTime, Utc};
use exckit_core::{Point, Segment, ToolDiameter, Units};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Document file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete drill document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcDocument {
    pub version: String,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub units: Units,
    /// Decimals used to round tool diameters
    pub decimals: u32,
    pub tools: Vec<ToolEntry>,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// One tool with everything cut by it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub diameter: f64,
    #[serde(default)]
    pub drills: Vec<Point>,
    #[serde(default)]
    pub slots: Vec<SlotEntry>,
}

/// Slot given by its end-cap centers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub start: Point,
    pub stop: Point,
}

impl ExcDocument {
    /// Create an empty document
    pub fn new(units: Units, decimals: u32) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                created: now,
                modified: now,
            },
            units,
            decimals,
            tools: Vec::new(),
        }
    }

    /// Describes every shape in `store`.
    ///
    /// Fails if a slot outline is too degenerate to recover its axis.
    pub fn from_store(
        store: &ShapeStore,
        engine: &ResizeEngine,
        units: Units,
        decimals: u32,
    ) -> EditorResult<Self> {
        let mut doc = Self::new(units, decimals);
        for tool in store.tools() {
            let mut entry = ToolEntry {
                diameter: tool.value(),
                drills: Vec::new(),
                slots: Vec::new(),
            };
            for stored in store.shapes(tool) {
                match &stored.shape {
                    ExcShape::Drill(drill) => entry.drills.push(drill.center()),
                    ExcShape::Slot(slot) => {
                        let medial = engine.medial_chord(&slot.outline)?;
                        let caps = medial.cap_centers(tool.value()).unwrap_or_else(|| {
                            let mid = medial.chord.midpoint();
                            Segment::new(mid, mid)
                        });
                        entry.slots.push(SlotEntry {
                            start: caps.start,
                            stop: caps.end,
                        });
                    }
                }
            }
            doc.tools.push(entry);
        }
        Ok(doc)
    }

    /// Rebuilds the shapes of this document, keying tools at `decimals`.
    ///
    /// The caller's precision wins over the one recorded in the document, so
    /// loaded tools share the rounding rule of the tools created afterwards.
    /// Entries whose diameters round to the same tool are merged. Nothing is
    /// returned unless every entry is valid.
    pub fn to_store(&self, engine: &ResizeEngine, decimals: u32) -> EditorResult<ShapeStore> {
        if decimals != self.decimals {
            debug!(
                "Re-keying document tools from {} to {} decimals",
                self.decimals, decimals
            );
        }
        let mut store = ShapeStore::new();
        for entry in &self.tools {
            let tool = ToolDiameter::new(entry.diameter, decimals)?;
            if !store.create_tool(tool) {
                warn!("Merging duplicate tool {} in document", tool);
            }
            let mut shapes: Vec<ExcShape> = Vec::with_capacity(entry.drills.len() + entry.slots.len());
            for center in &entry.drills {
                shapes.push(make_drill(*center, tool.value())?.into());
            }
            for slot in &entry.slots {
                let centers = Segment::new(slot.start, slot.stop);
                shapes.push(engine.slot_from_centers(&centers, tool.value()).into());
            }
            store.insert_all(tool, shapes);
        }
        Ok(store)
    }

    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        info!("Saved document to {}", path.as_ref().display());
        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> EditorResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let doc: ExcDocument = serde_json::from_str(&content)?;
        info!(
            "Loaded document from {} ({} tools)",
            path.as_ref().display(),
            doc.tools.len()
        );
        Ok(doc)
    }
}

impl ExcEditor {
    /// Snapshot of the current shapes as a document.
    pub fn to_document(&self) -> EditorResult<ExcDocument> {
        let geometry = &self.config().geometry;
        ExcDocument::from_store(self.store(), self.engine(), geometry.units, geometry.decimals)
    }

    /// Replaces the current shapes with those of `doc`.
    pub fn load_document(&mut self, doc: &ExcDocument) -> EditorResult<()> {
        if doc.units != self.config().geometry.units {
            warn!(
                "Document units {} differ from editor units {}; coordinates are used as is",
                doc.units,
                self.config().geometry.units
            );
        }
        let store = doc.to_store(self.engine(), self.config().geometry.decimals)?;
        self.replace_store(store);
        Ok(())
    }
}
