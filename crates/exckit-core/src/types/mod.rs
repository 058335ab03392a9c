//! Value types shared across the workspace.
//!
//! ## Modules
//!
//! - [`geometry`]: `Point`, `Segment` and axis-aligned `Bounds`.
//! - [`diameter`]: `ToolDiameter`, a rounded, orderable tool size key.
//! - [`placement`]: slot orientation and array layout selectors.

pub mod diameter;
pub mod geometry;
pub mod placement;

pub use diameter::ToolDiameter;
pub use geometry::{Bounds, Point, Segment};
pub use placement::{ArrayDirection, ArrayKind, LinearAxis, SlotOrientation};
