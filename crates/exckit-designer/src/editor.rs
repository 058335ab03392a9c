//! # Editor
//!
//! Tool-driven editing of a drill and slot layout.
//!
//! The editor owns the shape store and the configuration. Exactly one
//! [`ToolKind`] is active at a time and clicks are routed to it; tools that
//! need two clicks (circular arrays, move, copy) remember the first one in
//! their [`ToolPhase`].
//!
//! Placement parameters are read from a draft copy of the configuration that
//! is refreshed whenever a tool is activated. A successful commit writes the
//! draft section it used back into the configuration, so the next activation
//! starts from the last used values.

use crate::arrays::{
    circular_array, circular_slot_array, linear_array, ArrayGenerator, ArrayOperation,
    CircularArrayParams, GridArrayParams, LinearArrayParams,
};
use crate::error::{EditorError, EditorResult};
use crate::primitives::{make_drill, make_slot, SlotParams};
use crate::resize::ResizeEngine;
use crate::shape::ExcShape;
use crate::shape_store::{ShapeId, ShapeStore};
use crate::tool_table;
use exckit_core::{ArrayKind, Bounds, GeometryError, Point, ToolDiameter};
use exckit_settings::{ArraySettings, Config, CopyMode, GridPlacement};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    AddDrill,
    AddDrillArray,
    AddSlot,
    AddSlotArray,
    Resize,
    Move,
    Copy,
}

impl ToolKind {
    /// Tools that add new shapes with the active tool diameter.
    pub fn is_placement(&self) -> bool {
        matches!(
            self,
            Self::AddDrill | Self::AddDrillArray | Self::AddSlot | Self::AddSlotArray
        )
    }

    fn needs_selection(&self) -> bool {
        matches!(self, Self::Move | Self::Copy)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Select => "Select",
            Self::AddDrill => "Add Drill",
            Self::AddDrillArray => "Add Drill Array",
            Self::AddSlot => "Add Slot",
            Self::AddSlotArray => "Add Slot Array",
            Self::Resize => "Resize",
            Self::Move => "Move",
            Self::Copy => "Copy",
        };
        f.write_str(name)
    }
}

/// Progress of the active tool's click sequence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolPhase {
    /// The tool does not take placement clicks
    #[default]
    Idle,
    AwaitingFirstClick,
    AwaitingSecondClick {
        first: Point,
    },
    /// Shapes are being built for a commit
    Committing,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The click was recorded; the tool waits for another one.
    Pending,
    /// The selection changed. Carries the picked shape, if any.
    Selected(Option<ShapeId>),
    /// New shapes were stored.
    Committed(Vec<ShapeId>),
}

/// Changes applied to the store by one commit.
#[derive(Debug, Default)]
struct Batch {
    remove: Vec<ShapeId>,
    add: Vec<(ToolDiameter, ExcShape)>,
}

/// Drill and slot editor
#[derive(Debug, Clone)]
pub struct ExcEditor {
    store: ShapeStore,
    config: Config,
    draft: Config,
    engine: ResizeEngine,
    tool: ToolKind,
    phase: ToolPhase,
    active_tool: Option<ToolDiameter>,
    selection: Vec<ShapeId>,
}

impl ExcEditor {
    /// Creates an empty editor. The configuration is validated first.
    pub fn new(config: Config) -> EditorResult<Self> {
        Self::with_store(config, ShapeStore::new())
    }

    /// Creates an editor over existing shapes.
    ///
    /// The smallest tool in the store becomes the active one.
    pub fn with_store(config: Config, store: ShapeStore) -> EditorResult<Self> {
        config.validate()?;
        let engine = ResizeEngine::new(config.geometry.circle_steps);
        let active_tool = store.tools().next();
        Ok(Self {
            store,
            draft: config.clone(),
            config,
            engine,
            tool: ToolKind::Select,
            phase: ToolPhase::Idle,
            active_tool,
            selection: Vec::new(),
        })
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    /// Consumes the editor, returning its shapes and configuration.
    pub fn into_parts(self) -> (ShapeStore, Config) {
        (self.store, self.config)
    }

    /// Configuration holding the last used placement parameters.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parameters the active tool will use for its next commit.
    pub fn draft(&self) -> &Config {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Config {
        &mut self.draft
    }

    /// Changes placement parameters in the configuration and the draft.
    ///
    /// Unlike [`draft_mut`](Self::draft_mut), the change survives the next
    /// [`set_tool`](Self::set_tool). Nothing changes if the result does not
    /// validate.
    pub fn update_settings<F>(&mut self, update: F) -> EditorResult<()>
    where
        F: Fn(&mut Config),
    {
        let mut config = self.config.clone();
        update(&mut config);
        config.validate()?;
        update(&mut self.draft);
        self.config = config;
        Ok(())
    }

    pub fn engine(&self) -> &ResizeEngine {
        &self.engine
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn phase(&self) -> ToolPhase {
        self.phase
    }

    /// Tool diameter used by placements.
    pub fn active_tool(&self) -> Option<ToolDiameter> {
        self.active_tool
    }

    /// Rounds a diameter with the configured number of decimals.
    pub fn diameter(&self, value: f64) -> EditorResult<ToolDiameter> {
        Ok(ToolDiameter::new(value, self.config.geometry.decimals)?)
    }

    // ---- tool table ----

    /// Adds an empty tool. It becomes the active tool if none was set.
    pub fn add_tool(&mut self, value: f64) -> EditorResult<ToolDiameter> {
        let tool = self.diameter(value)?;
        tool_table::add_tool(&mut self.store, tool)?;
        self.active_tool.get_or_insert(tool);
        Ok(tool)
    }

    /// Deletes a tool and its shapes, returning how many shapes went with it.
    pub fn delete_tool(&mut self, value: f64) -> EditorResult<usize> {
        let tool = self.diameter(value)?;
        self.forget_selection_of(tool);
        let removed = tool_table::delete_tool(&mut self.store, tool)?;
        if self.active_tool == Some(tool) {
            self.active_tool = self.store.tools().next();
        }
        Ok(removed)
    }

    /// Rebuilds every shape of tool `old` at diameter `new`.
    pub fn edit_tool(&mut self, old: f64, new: f64) -> EditorResult<Vec<ShapeId>> {
        let (old, new) = (self.diameter(old)?, self.diameter(new)?);
        let ids = tool_table::edit_tool(&mut self.store, &self.engine, old, new)?;
        if old != new {
            self.selection.retain(|id| self.store.contains(*id));
            if self.active_tool == Some(old) {
                self.active_tool = Some(new);
            }
        }
        Ok(ids)
    }

    /// Turns every slot of a tool into a drill marker at its centroid.
    pub fn convert_slots_to_drills(&mut self, value: f64) -> EditorResult<Vec<ShapeId>> {
        let tool = self.diameter(value)?;
        let ids = tool_table::convert_slots_to_drills(&mut self.store, tool)?;
        self.selection.retain(|id| self.store.contains(*id));
        Ok(ids)
    }

    /// Makes an existing tool the one used by placements.
    pub fn set_active_tool(&mut self, value: f64) -> EditorResult<ToolDiameter> {
        let tool = self.diameter(value)?;
        if !self.store.has_tool(tool) {
            return Err(EditorError::UnknownTool(tool));
        }
        self.active_tool = Some(tool);
        Ok(tool)
    }

    fn forget_selection_of(&mut self, tool: ToolDiameter) {
        let doomed: Vec<ShapeId> = self.store.shapes(tool).iter().map(|s| s.id).collect();
        self.selection.retain(|id| !doomed.contains(id));
    }

    // ---- tools ----

    /// Activates a tool.
    ///
    /// Move and copy need a selection and placement tools need an active
    /// tool diameter; when the requirement is not met the editor falls back
    /// to Select.
    pub fn set_tool(&mut self, kind: ToolKind) -> EditorResult<()> {
        if kind.needs_selection() && self.selection.is_empty() {
            warn!("{} cancelled: nothing selected", kind);
            self.reset_to_select();
            return Err(EditorError::NothingSelected);
        }
        if kind.is_placement() && self.active_tool.is_none() {
            warn!("{} cancelled: no tool diameter selected", kind);
            self.reset_to_select();
            return Err(EditorError::NoActiveTool);
        }

        self.tool = kind;
        self.phase = match kind {
            ToolKind::Select | ToolKind::Resize => ToolPhase::Idle,
            _ => ToolPhase::AwaitingFirstClick,
        };
        self.draft = self.config.clone();
        debug!("Active tool: {}", kind);
        Ok(())
    }

    /// Drops a pending first click. Move and copy return to Select.
    pub fn cancel(&mut self) {
        match self.tool {
            ToolKind::Move | ToolKind::Copy => self.reset_to_select(),
            _ if matches!(self.phase, ToolPhase::AwaitingSecondClick { .. }) => {
                self.phase = ToolPhase::AwaitingFirstClick;
            }
            _ => {}
        }
    }

    fn reset_to_select(&mut self) {
        self.tool = ToolKind::Select;
        self.phase = ToolPhase::Idle;
    }

    /// Routes a click to the active tool.
    ///
    /// `additive` extends the selection instead of replacing it and is
    /// ignored by the placement tools.
    pub fn click(&mut self, point: Point, additive: bool) -> EditorResult<ClickOutcome> {
        if !point.is_finite() {
            return Err(GeometryError::invalid(format!("click at non-finite point {point:?}")).into());
        }

        match self.tool {
            ToolKind::Select | ToolKind::Resize => {
                Ok(ClickOutcome::Selected(self.select_at(point, additive)))
            }
            ToolKind::AddDrill => self.commit(|ed| ed.place_drill(point)),
            ToolKind::AddSlot => self.commit(|ed| ed.place_slot(point)),
            ToolKind::AddDrillArray | ToolKind::AddSlotArray => {
                let kind = self.array_settings().kind;
                match (kind, self.phase) {
                    (ArrayKind::Linear, _) => self.commit(|ed| ed.place_linear_array(point)),
                    (ArrayKind::Circular, ToolPhase::AwaitingSecondClick { first }) => {
                        self.commit(|ed| ed.place_circular_array(first, point))
                    }
                    (ArrayKind::Circular, _) => self.await_second_click(point),
                }
            }
            ToolKind::Move | ToolKind::Copy => match self.phase {
                ToolPhase::AwaitingSecondClick { first } => {
                    let tool = self.tool;
                    let outcome = self.commit(|ed| {
                        if tool == ToolKind::Move {
                            ed.move_selection(first, point)
                        } else {
                            ed.copy_selection(first, point)
                        }
                    })?;
                    self.selection.clear();
                    self.reset_to_select();
                    Ok(outcome)
                }
                _ => self.await_second_click(point),
            },
        }
    }

    fn await_second_click(&mut self, first: Point) -> EditorResult<ClickOutcome> {
        self.phase = ToolPhase::AwaitingSecondClick { first };
        Ok(ClickOutcome::Pending)
    }

    /// Builds a batch and applies it. Nothing is stored if building fails.
    fn commit<F>(&mut self, build: F) -> EditorResult<ClickOutcome>
    where
        F: FnOnce(&Self) -> EditorResult<Batch>,
    {
        self.phase = ToolPhase::Committing;
        let batch = match build(self) {
            Ok(batch) => batch,
            Err(err) => {
                warn!("{} rejected: {}", self.tool, err);
                self.phase = ToolPhase::AwaitingFirstClick;
                return Err(err);
            }
        };

        for id in &batch.remove {
            self.store.remove(*id);
        }
        let ids: Vec<ShapeId> = batch
            .add
            .into_iter()
            .map(|(tool, shape)| self.store.insert(tool, shape))
            .collect();

        self.remember_parameters();
        self.phase = ToolPhase::AwaitingFirstClick;
        info!("{}: stored {} shapes", self.tool, ids.len());
        Ok(ClickOutcome::Committed(ids))
    }

    fn remember_parameters(&mut self) {
        match self.tool {
            ToolKind::AddSlot => self.config.slot = self.draft.slot.clone(),
            ToolKind::AddDrillArray => self.config.drill_array = self.draft.drill_array.clone(),
            ToolKind::AddSlotArray => {
                self.config.slot = self.draft.slot.clone();
                self.config.slot_array = self.draft.slot_array.clone();
            }
            ToolKind::Copy => self.config.copy = self.draft.copy.clone(),
            _ => {}
        }
    }

    // ---- placement ----

    fn array_settings(&self) -> &ArraySettings {
        if self.tool == ToolKind::AddSlotArray {
            &self.draft.slot_array
        } else {
            &self.draft.drill_array
        }
    }

    fn placement_tool(&self) -> EditorResult<ToolDiameter> {
        self.active_tool.ok_or(EditorError::NoActiveTool)
    }

    fn slot_params(&self, tool: ToolDiameter) -> SlotParams {
        let slot = &self.draft.slot;
        SlotParams::new(
            tool.value(),
            slot.length,
            slot.orientation,
            slot.angle,
            self.draft.geometry.circle_steps,
        )
    }

    fn place_drill(&self, at: Point) -> EditorResult<Batch> {
        let tool = self.placement_tool()?;
        let drill = make_drill(at, tool.value())?;
        Ok(Batch {
            add: vec![(tool, drill.into())],
            ..Batch::default()
        })
    }

    fn place_slot(&self, at: Point) -> EditorResult<Batch> {
        let tool = self.placement_tool()?;
        let slot = make_slot(at, &self.slot_params(tool))?;
        Ok(Batch {
            add: vec![(tool, slot.into())],
            ..Batch::default()
        })
    }

    fn place_linear_array(&self, origin: Point) -> EditorResult<Batch> {
        let tool = self.placement_tool()?;
        let params = linear_params(self.array_settings());
        let shapes: Vec<ExcShape> = if self.tool == ToolKind::AddSlotArray {
            let slot = self.slot_params(tool);
            linear_array(|p| make_slot(p, &slot).map(ExcShape::from), origin, &params)?
        } else {
            linear_array(|p| make_drill(p, tool.value()).map(ExcShape::from), origin, &params)?
        };
        Ok(Batch {
            add: shapes.into_iter().map(|s| (tool, s)).collect(),
            ..Batch::default()
        })
    }

    fn place_circular_array(&self, origin: Point, start: Point) -> EditorResult<Batch> {
        let tool = self.placement_tool()?;
        let params = circular_params(origin, start, self.array_settings());
        let shapes: Vec<ExcShape> = if self.tool == ToolKind::AddSlotArray {
            circular_slot_array(&self.slot_params(tool), &params)?
                .into_iter()
                .map(ExcShape::from)
                .collect()
        } else {
            circular_array(|p| make_drill(p, tool.value()).map(ExcShape::from), &params)?
        };
        Ok(Batch {
            add: shapes.into_iter().map(|s| (tool, s)).collect(),
            ..Batch::default()
        })
    }

    // ---- move / copy ----

    fn selected_shapes(&self) -> impl Iterator<Item = (ToolDiameter, &ExcShape)> + '_ {
        self.selection
            .iter()
            .filter_map(|id| self.store.get(*id))
            .map(|(tool, stored)| (tool, &stored.shape))
    }

    /// Union of the bounding boxes of the selected shapes.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.selection
            .iter()
            .filter_map(|id| self.store.get(*id))
            .map(|(_, stored)| stored.bounds)
            .reduce(|a, b| a.union(&b))
    }

    fn move_selection(&self, reference: Point, destination: Point) -> EditorResult<Batch> {
        if self.selection.is_empty() {
            return Err(EditorError::NothingSelected);
        }
        let (dx, dy) = (destination.x - reference.x, destination.y - reference.y);
        Ok(Batch {
            remove: self.selection.clone(),
            add: self
                .selected_shapes()
                .map(|(tool, shape)| (tool, shape.translated(dx, dy)))
                .collect(),
        })
    }

    fn copy_selection(&self, reference: Point, destination: Point) -> EditorResult<Batch> {
        let bounds = self.selection_bounds().ok_or(EditorError::NothingSelected)?;
        let offsets = self.copy_offsets(reference, destination, &bounds)?;
        let mut add = Vec::with_capacity(offsets.len() * self.selection.len());
        for (dx, dy) in offsets {
            add.extend(
                self.selected_shapes()
                    .map(|(tool, shape)| (tool, shape.translated(dx, dy))),
            );
        }
        Ok(Batch {
            add,
            ..Batch::default()
        })
    }

    /// Translations applied to the selection by the copy tool.
    ///
    /// Linear and grid copies start at the destination. Circular copies go
    /// around the reference point, the destination being the first item.
    fn copy_offsets(
        &self,
        reference: Point,
        destination: Point,
        selection: &Bounds,
    ) -> EditorResult<Vec<(f64, f64)>> {
        let copy = &self.draft.copy;
        let (dx, dy) = (destination.x - reference.x, destination.y - reference.y);

        let operation = match copy.mode {
            CopyMode::Normal => return Ok(vec![(dx, dy)]),
            CopyMode::Linear => ArrayOperation::Linear(linear_params(&copy.array)),
            CopyMode::Circular => ArrayOperation::Circular(circular_params(
                reference,
                destination,
                &copy.array,
            )),
            CopyMode::Grid => ArrayOperation::Grid(match copy.placement {
                GridPlacement::Spacing => GridArrayParams::with_spacing(
                    copy.columns,
                    copy.rows,
                    selection,
                    copy.spacing_columns,
                    copy.spacing_rows,
                ),
                GridPlacement::Offset => {
                    GridArrayParams::new(copy.columns, copy.rows, copy.offset_x, copy.offset_y)
                }
            }),
        };

        let offsets = ArrayGenerator::offsets(&operation)?;
        if let ArrayOperation::Circular(_) = operation {
            return Ok(offsets);
        }
        Ok(offsets
            .into_iter()
            .map(|(ox, oy)| (ox + dx, oy + dy))
            .collect())
    }

    // ---- selection ----

    /// Selects the shape nearest to `point`.
    ///
    /// The nearest shape only counts when the click falls inside its
    /// bounding box grown by `selection_margin` times its larger side.
    /// Missing every shape clears the selection unless `additive` is set;
    /// hitting a selected shape with `additive` deselects it.
    pub fn select_at(&mut self, point: Point, additive: bool) -> Option<ShapeId> {
        let margin = self.config.editor.selection_margin;
        let hit = self.store.nearest(&point).and_then(|(_, stored, _)| {
            let b = stored.bounds;
            b.expanded(margin * b.width().max(b.height()))
                .contains_point(&point)
                .then_some(stored.id)
        });

        match hit {
            None => {
                if !additive {
                    self.selection.clear();
                }
            }
            Some(id) if additive => {
                if let Some(pos) = self.selection.iter().position(|s| *s == id) {
                    self.selection.remove(pos);
                } else {
                    self.selection.push(id);
                }
            }
            Some(id) => {
                self.selection.clear();
                self.selection.push(id);
            }
        }
        hit
    }

    /// Selects every shape whose bounds intersect `region`.
    ///
    /// Returns the size of the resulting selection.
    pub fn select_in_rect(&mut self, region: &Bounds, additive: bool) -> usize {
        if !additive {
            self.selection.clear();
        }
        for id in self.store.query_region(region) {
            if !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
        self.selection.len()
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    // ---- resize / delete ----

    /// Rebuilds the selected shapes at `value` and moves them to that tool.
    ///
    /// Only available with the Resize tool. Tools left without shapes are
    /// removed from the tool table.
    pub fn resize_selected(&mut self, value: f64) -> EditorResult<Vec<ShapeId>> {
        if self.tool != ToolKind::Resize {
            return Err(EditorError::wrong_tool(self.tool, "Resize"));
        }
        if self.selection.is_empty() {
            return Err(EditorError::NothingSelected);
        }
        let new = self.diameter(value)?;

        let mut sources = Vec::new();
        let rebuilt = self
            .selected_shapes()
            .map(|(tool, shape)| {
                if !sources.contains(&tool) {
                    sources.push(tool);
                }
                self.engine.resize(shape, tool.value(), new.value())
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| warn!("Resize rejected: {}", err))?;

        for id in std::mem::take(&mut self.selection) {
            self.store.remove(id);
        }
        let ids = self.store.insert_all(new, rebuilt);

        for tool in sources {
            if tool != new && self.store.shapes(tool).is_empty() {
                self.store.take_tool(tool);
                info!("Removed empty tool {}", tool);
                if self.active_tool == Some(tool) {
                    self.active_tool = Some(new);
                }
            }
        }
        info!("Resized {} shapes to {}", ids.len(), new);
        Ok(ids)
    }

    /// Removes the selected shapes. Their tools stay in the tool table.
    pub fn delete_selected(&mut self) -> EditorResult<usize> {
        if self.selection.is_empty() {
            return Err(EditorError::NothingSelected);
        }
        let removed = std::mem::take(&mut self.selection)
            .into_iter()
            .filter(|id| self.store.remove(*id).is_some())
            .count();
        info!("Deleted {} shapes", removed);
        Ok(removed)
    }

    /// Replaces all shapes, e.g. after loading a document.
    pub fn replace_store(&mut self, store: ShapeStore) {
        self.active_tool = store.tools().next();
        self.store = store;
        self.selection.clear();
        self.reset_to_select();
    }
}

fn linear_params(settings: &ArraySettings) -> LinearArrayParams {
    LinearArrayParams::new(
        settings.axis,
        settings.pitch,
        settings.linear_angle,
        settings.size,
    )
}

fn circular_params(origin: Point, start: Point, settings: &ArraySettings) -> CircularArrayParams {
    CircularArrayParams::new(origin, start, settings.direction, settings.angle, settings.size)
}
