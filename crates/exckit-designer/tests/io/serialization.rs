use exckit_core::{Point, SlotOrientation, Units};
use exckit_designer::{EditorError, ExcDocument, ExcEditor, ExcShape, ToolEntry, ToolKind};
use exckit_settings::Config;

fn populated_editor() -> ExcEditor {
    let mut editor = ExcEditor::new(Config::default()).unwrap();
    editor.add_tool(0.8).unwrap();
    editor.add_tool(1.2).unwrap();

    editor.set_active_tool(0.8).unwrap();
    editor.set_tool(ToolKind::AddDrill).unwrap();
    editor.click(Point::new(1.0, 1.0), false).unwrap();
    editor.click(Point::new(2.0, 1.0), false).unwrap();

    editor.set_active_tool(1.2).unwrap();
    editor.set_tool(ToolKind::AddSlot).unwrap();
    editor.draft_mut().slot.length = 6.0;
    editor.draft_mut().slot.orientation = SlotOrientation::Angle;
    editor.draft_mut().slot.angle = 45.0;
    editor.click(Point::new(10.0, 10.0), false).unwrap();
    editor
}

#[test]
fn test_document_round_trip_through_file() {
    let editor = populated_editor();
    let doc = editor.to_document().unwrap();
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.units, Units::Mm);
    assert_eq!(doc.tools.len(), 2);
    assert_eq!(doc.tools[0].drills.len(), 2);
    assert_eq!(doc.tools[1].slots.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panel.json");
    doc.save_to_file(&path).unwrap();

    let mut restored = ExcEditor::new(Config::default()).unwrap();
    restored
        .load_document(&ExcDocument::load_from_file(&path).unwrap())
        .unwrap();

    let original = editor.store();
    let loaded = restored.store();
    assert_eq!(
        original.tools().collect::<Vec<_>>(),
        loaded.tools().collect::<Vec<_>>()
    );
    for tool in original.tools() {
        for (a, b) in original.shapes(tool).iter().zip(loaded.shapes(tool)) {
            assert!(a.bounds.center().approx_eq(&b.bounds.center(), 0.05));
            assert!((a.bounds.width() - b.bounds.width()).abs() < 0.05);
            assert!((a.bounds.height() - b.bounds.height()).abs() < 0.05);
        }
    }
}

#[test]
fn test_loaded_slot_keeps_orientation() {
    let editor = populated_editor();
    let doc = editor.to_document().unwrap();
    let caps = doc.tools[1].slots[0];
    // 45 degrees clockwise: cap line runs down to the right
    let (dx, dy) = (caps.stop.x - caps.start.x, caps.stop.y - caps.start.y);
    assert!((dx * dy) < 0.0);
    assert!(((dx * dx + dy * dy).sqrt() - 4.8).abs() < 0.05);
}

#[test]
fn test_load_replaces_selection_and_tool() {
    let mut editor = populated_editor();
    let doc = editor.to_document().unwrap();
    editor.set_tool(ToolKind::Select).unwrap();
    editor.select_at(Point::new(1.0, 1.0), false);
    editor.load_document(&doc).unwrap();
    assert_eq!(editor.selected_count(), 0);
    assert_eq!(editor.tool(), ToolKind::Select);
    assert_eq!(editor.store().len(), 3);
    assert!(editor
        .store()
        .iter()
        .any(|(_, s)| matches!(s.shape, ExcShape::Slot(_))));
}

#[test]
fn test_load_rekeys_tools_at_editor_precision() {
    let mut doc = ExcDocument::new(Units::Mm, 2);
    doc.tools.push(ToolEntry {
        diameter: 0.8,
        drills: vec![Point::new(1.0, 1.0)],
        slots: Vec::new(),
    });

    let mut editor = ExcEditor::new(Config::default()).unwrap();
    editor.load_document(&doc).unwrap();

    editor.set_active_tool(0.8).unwrap();
    assert!(matches!(editor.add_tool(0.8), Err(EditorError::ToolExists(_))));
    editor.add_tool(0.5).unwrap();

    let tools: Vec<_> = editor.store().tools().collect();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].value(), 0.5);
    assert_eq!(tools[1].value(), 0.8);
    assert!(tools.iter().all(|t| t.decimals() == 4));
    assert_eq!(tools[1].to_string(), "0.8000");
}

#[test]
fn test_load_missing_file() {
    assert!(ExcDocument::load_from_file("/nonexistent/panel.json").is_err());
}
