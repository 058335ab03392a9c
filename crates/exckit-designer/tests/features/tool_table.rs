use exckit_core::{Point, SlotOrientation, ToolDiameter};
use exckit_designer::primitives::{make_drill, make_slot, SlotParams};
use exckit_designer::tool_table::{add_tool, convert_slots_to_drills, delete_tool, edit_tool};
use exckit_designer::{EditorError, ExcShape, ResizeEngine, ShapeStore, SlotShape};

fn dia(v: f64) -> ToolDiameter {
    ToolDiameter::new(v, 4).unwrap()
}

fn store_with_slot() -> ShapeStore {
    let mut store = ShapeStore::new();
    let slot = make_slot(
        Point::new(0.0, 0.0),
        &SlotParams::new(1.0, 6.0, SlotOrientation::Y, 0.0, 64),
    )
    .unwrap();
    store.insert(dia(1.0), slot.into());
    store.insert(dia(1.0), make_drill(Point::new(4.0, 0.0), 1.0).unwrap().into());
    store
}

#[test]
fn test_tools_are_keyed_by_rounded_diameter() {
    let mut store = ShapeStore::new();
    add_tool(&mut store, dia(0.80004)).unwrap();
    assert!(store.has_tool(dia(0.8)));
    assert!(matches!(
        add_tool(&mut store, dia(0.79996)),
        Err(EditorError::ToolExists(_))
    ));
}

#[test]
fn test_edit_tool_rebuilds_slots() {
    let mut store = store_with_slot();
    let engine = ResizeEngine::default();
    edit_tool(&mut store, &engine, dia(1.0), dia(0.5)).unwrap();

    let slots: Vec<&SlotShape> = store
        .shapes(dia(0.5))
        .iter()
        .filter_map(|s| match &s.shape {
            ExcShape::Slot(slot) => Some(slot),
            ExcShape::Drill(_) => None,
        })
        .collect();
    assert_eq!(slots.len(), 1);
    let b = slots[0].bounds();
    assert!((b.height() - 6.0).abs() < 0.05);
    assert!((b.width() - 0.5).abs() < 0.05);
}

#[test]
fn test_failed_edit_leaves_table_untouched() {
    let mut store = store_with_slot();
    store.insert(
        dia(1.0),
        SlotShape::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).into(),
    );
    let engine = ResizeEngine::default();
    assert!(edit_tool(&mut store, &engine, dia(1.0), dia(2.0)).is_err());
    assert_eq!(store.shapes(dia(1.0)).len(), 3);
    assert!(!store.has_tool(dia(2.0)));
}

#[test]
fn test_delete_tool_keeps_others() {
    let mut store = store_with_slot();
    add_tool(&mut store, dia(2.0)).unwrap();
    assert_eq!(delete_tool(&mut store, dia(1.0)).unwrap(), 2);
    assert_eq!(store.tools().collect::<Vec<_>>(), vec![dia(2.0)]);
}

#[test]
fn test_convert_slots_to_drills_at_centroid() {
    let mut store = store_with_slot();
    let before: Vec<_> = store.shapes(dia(1.0)).iter().map(|s| s.id).collect();

    let ids = convert_slots_to_drills(&mut store, dia(1.0)).unwrap();
    assert_eq!(ids.len(), 1);

    let counts = store.counts(dia(1.0));
    assert_eq!((counts.drills, counts.slots), (2, 0));
    // the existing drill keeps its id
    assert!(store.contains(before[1]));
    assert!(!store.contains(before[0]));

    match &store.get(ids[0]).unwrap().1.shape {
        ExcShape::Drill(d) => {
            assert!(d.center().approx_eq(&Point::new(0.0, 0.0), 1e-9));
            assert!((d.size() - 1.0).abs() < 1e-12);
        }
        other => panic!("expected drill, got {other:?}"),
    }
}

#[test]
fn test_convert_without_slots_is_a_no_op() {
    let mut store = ShapeStore::new();
    store.insert(dia(0.6), make_drill(Point::new(1.0, 1.0), 0.6).unwrap().into());
    let ids = convert_slots_to_drills(&mut store, dia(0.6)).unwrap();
    assert!(ids.is_empty());
    assert_eq!(store.len(), 1);
}
