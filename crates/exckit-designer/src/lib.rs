//! # exckit Designer
//!
//! Geometry editing for drill and slot layouts: building drill markers and
//! slot outlines, laying them out in arrays, resizing them to a new tool
//! diameter and keeping them in a tool table.
//!
//! ## Core Components
//!
//! ### Geometry
//! - **Primitives**: Cross-shaped drill markers and stadium-shaped slots
//! - **Arc tessellation**: Polyline approximation of circular arcs
//! - **Arrays**: Linear, circular and grid placement patterns
//! - **Resize**: Drill scaling and medial-chord slot reconstruction
//! - **Kernel**: Planar geometry operations behind a small trait
//!
//! ### Editing
//! - **Shape store**: Shapes grouped by rounded tool diameter
//! - **Tool table**: Adding, deleting and re-sizing whole tools
//! - **Editor**: Tool state machine routing clicks to placements, selection,
//!   move, copy and resize
//! - **Documents**: JSON round-trip of the tool table
//!
//! ## Architecture
//!
//! ```text
//! ExcEditor (tools, selection, last used parameters)
//!   ├── ShapeStore (diameter -> shapes)
//!   ├── ResizeEngine
//!   │     └── GeometryKernel (PlanarKernel)
//!   └── Primitives / Arrays
//!         └── Arc tessellator
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use exckit_designer::{ExcEditor, ToolKind};
//! use exckit_core::Point;
//!
//! let mut editor = ExcEditor::new(Default::default())?;
//! editor.add_tool(0.8)?;
//! editor.set_tool(ToolKind::AddDrill)?;
//! editor.click(Point::new(10.0, 10.0), false)?;
//! ```

pub mod arc;
pub mod arrays;
pub mod editor;
pub mod error;
pub mod kernel;
pub mod primitives;
pub mod resize;
pub mod serialization;
pub mod shape;
pub mod shape_store;
pub mod tool_table;

pub use arc::{arc, ArcDirection};
pub use arrays::{
    circular_array, circular_slot_array, linear_array, ArrayGenerator, ArrayOperation,
    ArrayType, CircularArrayParams, CircularPlacement, GridArrayParams, LinearArrayParams,
};
pub use editor::{ClickOutcome, ExcEditor, ToolKind, ToolPhase};
pub use error::{EditorError, EditorResult};
pub use kernel::{GeometryKernel, PlanarKernel};
pub use primitives::{make_drill, make_slot, SlotParams};
pub use resize::{resize_drill, resize_slot, MedialChord, ResizeEngine};
pub use serialization::{DocumentMetadata, ExcDocument, SlotEntry, ToolEntry};
pub use shape::{DrillShape, ExcShape, SlotShape};
pub use shape_store::{ShapeId, ShapeStore, StoredShape, ToolCounts};
