//! Tool table operations
//!
//! Adding, deleting and re-sizing whole tools. Re-sizing a tool rebuilds
//! every shape cut with it at the new diameter and merges them into the
//! bucket for that diameter. Slots of a tool can also be collapsed into
//! drill markers at their centroids.

use crate::error::{EditorError, EditorResult};
use crate::kernel::GeometryKernel;
use crate::primitives::make_drill;
use crate::resize::ResizeEngine;
use crate::shape::ExcShape;
use crate::shape_store::{ShapeId, ShapeStore};
use exckit_core::ToolDiameter;
use tracing::info;

/// Creates an empty tool.
pub fn add_tool(store: &mut ShapeStore, tool: ToolDiameter) -> EditorResult<()> {
    if !store.create_tool(tool) {
        return Err(EditorError::ToolExists(tool));
    }
    info!("Added tool {}", tool);
    Ok(())
}

/// Removes a tool and every shape cut with it, returning how many shapes
/// were removed.
pub fn delete_tool(store: &mut ShapeStore, tool: ToolDiameter) -> EditorResult<usize> {
    let removed = store
        .take_tool(tool)
        .ok_or(EditorError::UnknownTool(tool))?;
    info!("Deleted tool {} with {} shapes", tool, removed.len());
    Ok(removed.len())
}

/// Moves every shape of `old` to `new`, rebuilding it at the new diameter.
///
/// All shapes are rebuilt before the store is touched; if any rebuild fails
/// the store is left as it was.
pub fn edit_tool<K: GeometryKernel>(
    store: &mut ShapeStore,
    engine: &ResizeEngine<K>,
    old: ToolDiameter,
    new: ToolDiameter,
) -> EditorResult<Vec<ShapeId>> {
    if !store.has_tool(old) {
        return Err(EditorError::UnknownTool(old));
    }
    if old == new {
        return Ok(store.shapes(old).iter().map(|s| s.id).collect());
    }

    let rebuilt: Vec<ExcShape> = store
        .shapes(old)
        .iter()
        .map(|s| engine.resize(&s.shape, old.value(), new.value()))
        .collect::<Result<_, _>>()?;

    store.take_tool(old);
    if !store.has_tool(new) {
        store.create_tool(new);
    }
    let ids = store.insert_all(new, rebuilt);
    info!("Changed tool {} to {} ({} shapes)", old, new, ids.len());
    Ok(ids)
}

/// Replaces every slot of `tool` with a drill marker at the slot centroid,
/// sized to the tool. Drills of the tool are kept as they are.
///
/// Returns the ids of the new drills. Every marker is built before any slot
/// is removed.
pub fn convert_slots_to_drills(
    store: &mut ShapeStore,
    tool: ToolDiameter,
) -> EditorResult<Vec<ShapeId>> {
    if !store.has_tool(tool) {
        return Err(EditorError::UnknownTool(tool));
    }

    let mut slot_ids = Vec::new();
    let mut drills: Vec<ExcShape> = Vec::new();
    for stored in store.shapes(tool) {
        if let ExcShape::Slot(slot) = &stored.shape {
            drills.push(make_drill(slot.center(), tool.value())?.into());
            slot_ids.push(stored.id);
        }
    }

    for id in &slot_ids {
        store.remove(*id);
    }
    let ids = store.insert_all(tool, drills);
    info!("Converted {} slots of tool {} to drills", ids.len(), tool);
    Ok(ids)
}
