use exckit_core::{ArrayDirection, ArrayKind, Bounds, LinearAxis, Point};
use exckit_designer::{ClickOutcome, EditorError, ExcEditor, ExcShape, ShapeId, ToolKind, ToolPhase};
use exckit_settings::{Config, CopyMode, GridPlacement};

fn editor() -> ExcEditor {
    let mut editor = ExcEditor::new(Config::default()).unwrap();
    editor.add_tool(1.0).unwrap();
    editor
}

fn place_drills(editor: &mut ExcEditor, points: &[(f64, f64)]) -> Vec<ShapeId> {
    editor.set_tool(ToolKind::AddDrill).unwrap();
    let mut ids = Vec::new();
    for &(x, y) in points {
        match editor.click(Point::new(x, y), false).unwrap() {
            ClickOutcome::Committed(mut new) => ids.append(&mut new),
            other => panic!("unexpected {other:?}"),
        }
    }
    editor.set_tool(ToolKind::Select).unwrap();
    ids
}

fn centers(editor: &ExcEditor) -> Vec<Point> {
    editor
        .store()
        .iter()
        .map(|(_, stored)| stored.shape.center())
        .collect()
}

fn contains(points: &[Point], p: Point) -> bool {
    points.iter().any(|q| q.approx_eq(&p, 1e-9))
}

#[test]
fn test_linear_drill_array_in_one_click() {
    let mut editor = editor();
    editor.set_tool(ToolKind::AddDrillArray).unwrap();
    {
        let array = &mut editor.draft_mut().drill_array;
        array.kind = ArrayKind::Linear;
        array.axis = LinearAxis::Y;
        array.pitch = 2.5;
        array.size = 3;
    }
    editor.click(Point::new(1.0, 1.0), false).unwrap();
    let c = centers(&editor);
    assert_eq!(c.len(), 3);
    assert!(contains(&c, Point::new(1.0, 6.0)));
    assert_eq!(editor.config().drill_array.axis, LinearAxis::Y);
}

#[test]
fn test_overflowing_slot_array_stores_nothing() {
    let mut editor = editor();
    editor.set_tool(ToolKind::AddSlotArray).unwrap();
    {
        let array = &mut editor.draft_mut().slot_array;
        array.kind = ArrayKind::Circular;
        array.angle = 40.0;
        array.size = 10;
    }
    editor.click(Point::new(0.0, 0.0), false).unwrap();
    let err = editor.click(Point::new(10.0, 0.0), false).unwrap_err();
    assert!(matches!(err, EditorError::Geometry(_)));
    assert!(editor.store().is_empty());
    assert_eq!(editor.config().slot_array.kind, ArrayKind::Linear);
    assert_eq!(editor.phase(), ToolPhase::AwaitingFirstClick);
}

#[test]
fn test_move_selection() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0), (10.0, 0.0)]);
    editor.select_at(Point::new(0.0, 0.0), false);

    editor.set_tool(ToolKind::Move).unwrap();
    assert_eq!(
        editor.click(Point::new(0.0, 0.0), false).unwrap(),
        ClickOutcome::Pending
    );
    editor.click(Point::new(3.0, 4.0), false).unwrap();

    let c = centers(&editor);
    assert_eq!(c.len(), 2);
    assert!(contains(&c, Point::new(3.0, 4.0)));
    assert!(contains(&c, Point::new(10.0, 0.0)));
    assert_eq!(editor.tool(), ToolKind::Select);
    assert_eq!(editor.selected_count(), 0);
}

#[test]
fn test_copy_normal_keeps_original() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0)]);
    editor.select_at(Point::new(0.0, 0.0), false);
    editor.set_tool(ToolKind::Copy).unwrap();
    editor.click(Point::new(0.0, 0.0), false).unwrap();
    editor.click(Point::new(5.0, 5.0), false).unwrap();

    let c = centers(&editor);
    assert_eq!(c.len(), 2);
    assert!(contains(&c, Point::new(0.0, 0.0)));
    assert!(contains(&c, Point::new(5.0, 5.0)));
}

#[test]
fn test_copy_grid_with_offsets() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0)]);
    editor.select_at(Point::new(0.0, 0.0), false);
    editor.set_tool(ToolKind::Copy).unwrap();
    {
        let copy = &mut editor.draft_mut().copy;
        copy.mode = CopyMode::Grid;
        copy.placement = GridPlacement::Offset;
        copy.columns = 3;
        copy.rows = 2;
        copy.offset_x = 2.0;
        copy.offset_y = 4.0;
    }
    editor.click(Point::new(0.0, 0.0), false).unwrap();
    editor.click(Point::new(10.0, 0.0), false).unwrap();

    let c = centers(&editor);
    assert_eq!(c.len(), 7);
    assert!(contains(&c, Point::new(10.0, 0.0)));
    assert!(contains(&c, Point::new(14.0, 4.0)));
    assert_eq!(editor.config().copy.mode, CopyMode::Grid);
}

#[test]
fn test_copy_grid_with_spacing() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0)]);
    editor.select_at(Point::new(0.0, 0.0), false);
    editor.set_tool(ToolKind::Copy).unwrap();
    {
        let copy = &mut editor.draft_mut().copy;
        copy.mode = CopyMode::Grid;
        copy.placement = GridPlacement::Spacing;
        copy.columns = 2;
        copy.rows = 1;
        copy.spacing_columns = 0.5;
    }
    editor.click(Point::new(0.0, 0.0), false).unwrap();
    editor.click(Point::new(0.0, 0.0), false).unwrap();

    // the drill is 1 wide, so the second column is 1.5 to the right
    let c = centers(&editor);
    assert!(contains(&c, Point::new(1.5, 0.0)));
}

#[test]
fn test_copy_circular_around_reference() {
    let mut editor = editor();
    place_drills(&mut editor, &[(5.0, 0.0)]);
    editor.select_at(Point::new(5.0, 0.0), false);
    editor.set_tool(ToolKind::Copy).unwrap();
    {
        let copy = &mut editor.draft_mut().copy;
        copy.mode = CopyMode::Circular;
        copy.array.direction = ArrayDirection::Ccw;
        copy.array.angle = 90.0;
        copy.array.size = 4;
    }
    editor.click(Point::new(5.0, 0.0), false).unwrap();
    editor.click(Point::new(7.0, 0.0), false).unwrap();

    let c = centers(&editor);
    assert_eq!(c.len(), 5);
    assert!(contains(&c, Point::new(7.0, 0.0)));
    assert!(contains(&c, Point::new(5.0, 2.0)));
    assert!(contains(&c, Point::new(3.0, 0.0)));
    assert!(contains(&c, Point::new(5.0, -2.0)));
}

#[test]
fn test_resize_selected_moves_to_new_tool() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0), (10.0, 0.0)]);
    editor.select_in_rect(&Bounds::new(-20.0, -20.0, 20.0, 20.0), false);

    editor.set_tool(ToolKind::Resize).unwrap();
    let ids = editor.resize_selected(0.6).unwrap();
    assert_eq!(ids.len(), 2);

    let store = editor.store();
    let new = editor.diameter(0.6).unwrap();
    assert_eq!(store.tools().collect::<Vec<_>>(), vec![new]);
    assert_eq!(editor.active_tool(), Some(new));
    for stored in store.shapes(new) {
        match &stored.shape {
            ExcShape::Drill(d) => assert!((d.size() - 0.6).abs() < 1e-12),
            other => panic!("expected drill, got {other:?}"),
        }
    }
}

#[test]
fn test_partial_resize_keeps_source_tool() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0), (10.0, 0.0)]);
    editor.select_at(Point::new(0.0, 0.0), false);
    editor.set_tool(ToolKind::Resize).unwrap();
    editor.resize_selected(2.0).unwrap();
    assert_eq!(editor.store().tool_count(), 2);
}

#[test]
fn test_resize_invalid_diameter_is_atomic() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0)]);
    editor.select_at(Point::new(0.0, 0.0), false);
    editor.set_tool(ToolKind::Resize).unwrap();
    assert!(editor.resize_selected(-1.0).is_err());
    assert_eq!(editor.store().len(), 1);
    assert_eq!(editor.selected_count(), 1);
}

#[test]
fn test_delete_selected() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0), (10.0, 0.0)]);
    assert!(matches!(
        editor.delete_selected(),
        Err(EditorError::NothingSelected)
    ));
    editor.select_at(Point::new(10.0, 0.0), false);
    assert_eq!(editor.delete_selected().unwrap(), 1);
    assert_eq!(editor.store().len(), 1);
    assert_eq!(editor.store().tool_count(), 1);
}

#[test]
fn test_edit_tool_updates_active_tool() {
    let mut editor = editor();
    place_drills(&mut editor, &[(0.0, 0.0)]);
    editor.edit_tool(1.0, 1.2).unwrap();
    assert_eq!(editor.active_tool(), Some(editor.diameter(1.2).unwrap()));
}

#[test]
fn test_delete_active_tool_falls_back() {
    let mut editor = editor();
    editor.add_tool(0.5).unwrap();
    editor.set_active_tool(1.0).unwrap();
    editor.delete_tool(1.0).unwrap();
    assert_eq!(editor.active_tool(), Some(editor.diameter(0.5).unwrap()));
    assert!(matches!(
        editor.set_active_tool(1.0),
        Err(EditorError::UnknownTool(_))
    ));
}

#[test]
fn test_convert_slots_drops_them_from_selection() {
    let mut editor = editor();
    editor.set_tool(ToolKind::AddSlot).unwrap();
    editor.draft_mut().slot.length = 4.0;
    editor.click(Point::new(0.0, 0.0), false).unwrap();
    editor.set_tool(ToolKind::Select).unwrap();
    editor.select_at(Point::new(0.0, 0.0), false).unwrap();
    assert_eq!(editor.selected_count(), 1);

    let ids = editor.convert_slots_to_drills(1.0).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(editor.selected_count(), 0);
    assert!(editor.store().iter().all(|(_, s)| s.shape.is_drill()));
    assert!(matches!(
        editor.convert_slots_to_drills(2.0),
        Err(EditorError::UnknownTool(_))
    ));
}
