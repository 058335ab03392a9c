use exckit_core::{ArrayDirection, GeometryError, LinearAxis, Point, SlotOrientation};
use exckit_designer::arrays::{
    circular_array, circular_slot_array, linear_array, ArrayGenerator, ArrayOperation,
    ArrayType, CircularArrayParams, GridArrayParams, LinearArrayParams,
};
use exckit_designer::primitives::{make_drill, SlotParams};
use exckit_designer::DrillShape;

fn drill_factory(diameter: f64) -> impl FnMut(Point) -> exckit_core::GeometryResult<DrillShape> {
    move |p| make_drill(p, diameter)
}

#[test]
fn test_linear_drill_array_example() {
    let params = LinearArrayParams::new(LinearAxis::X, 2.0, 0.0, 3);
    let drills = linear_array(drill_factory(0.5), Point::new(0.0, 0.0), &params).unwrap();
    let centers: Vec<Point> = drills.iter().map(|d| d.center()).collect();
    assert_eq!(
        centers,
        vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(4.0, 0.0)]
    );
}

#[test]
fn test_linear_array_along_y_from_offset_origin() {
    let params = LinearArrayParams::new(LinearAxis::Y, 1.5, 0.0, 4);
    let drills = linear_array(drill_factory(0.5), Point::new(3.0, 1.0), &params).unwrap();
    assert_eq!(drills.len(), 4);
    assert_eq!(drills[3].center(), Point::new(3.0, 5.5));
}

#[test]
fn test_linear_array_propagates_factory_failure() {
    let params = LinearArrayParams::new(LinearAxis::X, 1.0, 0.0, 3);
    let result = linear_array(drill_factory(-1.0), Point::new(0.0, 0.0), &params);
    assert!(matches!(result, Err(GeometryError::InvalidGeometry { .. })));
}

#[test]
fn test_circular_full_turn_boundary() {
    let origin = Point::new(0.0, 0.0);
    let ok = CircularArrayParams::new(origin, Point::new(5.0, 0.0), ArrayDirection::Cw, 36.0, 10);
    assert_eq!(circular_array(drill_factory(0.5), &ok).unwrap().len(), 10);

    let over = CircularArrayParams::new(origin, Point::new(5.0, 0.0), ArrayDirection::Cw, 40.0, 10);
    assert!(matches!(
        circular_array(drill_factory(0.5), &over),
        Err(GeometryError::ArrayOverflow { count: 10, .. })
    ));
}

#[test]
fn test_circular_degenerate_start_point() {
    let p = Point::new(2.0, 2.0);
    for direction in [ArrayDirection::Cw, ArrayDirection::Ccw] {
        for count in [1, 4] {
            let params = CircularArrayParams::new(p, p, direction, 10.0, count);
            assert!(matches!(
                circular_array(drill_factory(0.5), &params),
                Err(GeometryError::DegenerateArray { .. })
            ));
        }
    }
}

#[test]
fn test_circular_items_lie_on_circle() {
    let origin = Point::new(10.0, -4.0);
    let params = CircularArrayParams::new(origin, Point::new(13.0, 0.0), ArrayDirection::Ccw, 45.0, 8);
    for drill in circular_array(drill_factory(0.3), &params).unwrap() {
        assert!((drill.center().distance_to(&origin) - 5.0).abs() < 1e-9);
    }
}

#[test]
fn test_circular_slot_array_follows_circle() {
    let slot = SlotParams::new(0.5, 3.0, SlotOrientation::X, 0.0, 32);
    let params = CircularArrayParams::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 8.0),
        ArrayDirection::Cw,
        90.0,
        4,
    );
    let slots = circular_slot_array(&slot, &params).unwrap();
    assert_eq!(slots.len(), 4);
    // start point straight above the origin: first slot is radial (vertical)
    let b = slots[0].bounds();
    assert!((b.height() - 3.0).abs() < 1e-9);
    assert!(b.center().approx_eq(&Point::new(0.0, 8.0), 1e-9));
    // next one clockwise sits to the right and is horizontal
    let b = slots[1].bounds();
    assert!((b.width() - 3.0).abs() < 1e-9);
    assert!(b.center().approx_eq(&Point::new(8.0, 0.0), 1e-9));
}

#[test]
fn test_grid_operation() {
    let op = ArrayOperation::Grid(GridArrayParams::new(2, 3, 4.0, 5.0));
    assert_eq!(op.array_type(), ArrayType::Grid);
    assert_eq!(op.total_copies(), 6);
    let offsets = ArrayGenerator::offsets(&op).unwrap();
    assert_eq!(offsets.last(), Some(&(4.0, 10.0)));
}

#[test]
fn test_empty_grid_is_degenerate() {
    let op = ArrayOperation::Grid(GridArrayParams::new(0, 3, 4.0, 5.0));
    assert!(matches!(
        ArrayGenerator::offsets(&op),
        Err(GeometryError::DegenerateArray { .. })
    ));
}
