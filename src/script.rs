//! Edit scripts
//!
//! An edit script is a JSON list of editor commands, replayed in order
//! against an [`ExcEditor`]. It drives the same operations an interactive
//! front end would: tool changes, clicks, selection, resize and the tool
//! table.
//!
//! Parameter commands (`slot`, `drill_array`, `slot_array`, `copy`) update
//! the configuration, so they may come before or after the `tool` command
//! that uses them.
//!
//! ```json
//! { "commands": [
//!     { "op": "add_tool", "diameter": 0.8 },
//!     { "op": "tool", "kind": "add_drill" },
//!     { "op": "click", "x": 10.0, "y": 5.0 }
//! ] }
//! ```

use anyhow::{Context, Result};
use exckit_core::{Bounds, Point};
use exckit_designer::{ClickOutcome, EditorResult, ExcEditor, ToolKind};
use exckit_settings::{ArraySettings, CopySettings, SlotSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One editor command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    AddTool {
        diameter: f64,
    },
    DeleteTool {
        diameter: f64,
    },
    EditTool {
        from: f64,
        to: f64,
    },
    /// Replace every slot of a tool with a drill at its centroid
    ConvertSlots {
        diameter: f64,
    },
    /// Diameter used by placements
    UseTool {
        diameter: f64,
    },
    Tool {
        kind: ToolKind,
    },
    Slot(SlotSettings),
    DrillArray(ArraySettings),
    SlotArray(ArraySettings),
    Copy(CopySettings),
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        additive: bool,
    },
    SelectRect {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        #[serde(default)]
        additive: bool,
    },
    Deselect,
    Resize {
        diameter: f64,
    },
    Delete,
    Cancel,
}

impl EditCommand {
    fn apply(&self, editor: &mut ExcEditor) -> EditorResult<usize> {
        match self {
            Self::AddTool { diameter } => editor.add_tool(*diameter).map(|_| 0),
            Self::DeleteTool { diameter } => editor.delete_tool(*diameter),
            Self::EditTool { from, to } => editor.edit_tool(*from, *to).map(|ids| ids.len()),
            Self::ConvertSlots { diameter } => editor
                .convert_slots_to_drills(*diameter)
                .map(|ids| ids.len()),
            Self::UseTool { diameter } => editor.set_active_tool(*diameter).map(|_| 0),
            Self::Tool { kind } => editor.set_tool(*kind).map(|_| 0),
            Self::Slot(slot) => editor
                .update_settings(|c| c.slot = slot.clone())
                .map(|_| 0),
            Self::DrillArray(array) => editor
                .update_settings(|c| c.drill_array = array.clone())
                .map(|_| 0),
            Self::SlotArray(array) => editor
                .update_settings(|c| c.slot_array = array.clone())
                .map(|_| 0),
            Self::Copy(copy) => editor
                .update_settings(|c| c.copy = copy.clone())
                .map(|_| 0),
            Self::Click { x, y, additive } => {
                match editor.click(Point::new(*x, *y), *additive)? {
                    ClickOutcome::Committed(ids) => Ok(ids.len()),
                    ClickOutcome::Pending | ClickOutcome::Selected(_) => Ok(0),
                }
            }
            Self::SelectRect {
                min_x,
                min_y,
                max_x,
                max_y,
                additive,
            } => {
                editor.select_in_rect(&Bounds::new(*min_x, *min_y, *max_x, *max_y), *additive);
                Ok(0)
            }
            Self::Deselect => {
                editor.deselect_all();
                Ok(0)
            }
            Self::Resize { diameter } => editor.resize_selected(*diameter).map(|ids| ids.len()),
            Self::Delete => editor.delete_selected(),
            Self::Cancel => {
                editor.cancel();
                Ok(0)
            }
        }
    }
}

/// A list of commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    pub commands: Vec<EditCommand>,
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Commands that succeeded
    pub applied: usize,
    /// Commands that failed and were skipped
    pub rejected: usize,
    /// Shapes stored, moved or removed by the applied commands
    pub shapes_touched: usize,
}

impl EditScript {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }

    /// Replays every command against `editor`.
    ///
    /// A failing command aborts the replay unless `keep_going` is set, in
    /// which case it is logged and skipped. Failed commands never change the
    /// shapes.
    pub fn run(&self, editor: &mut ExcEditor, keep_going: bool) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();
        for (index, command) in self.commands.iter().enumerate() {
            match command.apply(editor) {
                Ok(touched) => {
                    report.applied += 1;
                    report.shapes_touched += touched;
                }
                Err(err) if keep_going => {
                    warn!("Command #{} ({:?}) rejected: {}", index + 1, command, err);
                    report.rejected += 1;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Command #{} failed", index + 1));
                }
            }
        }
        info!(
            "Script done: {} applied, {} rejected, {} shapes in the tool table",
            report.applied,
            report.rejected,
            editor.store().len()
        );
        Ok(report)
    }
}
