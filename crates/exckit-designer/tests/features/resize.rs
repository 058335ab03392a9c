use exckit_core::{GeometryError, Point, SlotOrientation};
use exckit_designer::kernel::{GeometryKernel, PlanarKernel};
use exckit_designer::primitives::{make_drill, make_slot, SlotParams};
use exckit_designer::resize::{resize_drill, ResizeEngine};
use exckit_designer::{ExcShape, SlotShape};

const TOLERANCE: f64 = 0.05;

fn slot(center: Point, diameter: f64, length: f64, orientation: SlotOrientation, angle: f64) -> SlotShape {
    make_slot(center, &SlotParams::new(diameter, length, orientation, angle, 64)).unwrap()
}

#[test]
fn test_drill_resize_example() {
    let drill = make_drill(Point::new(3.0, 4.0), 1.0).unwrap();
    let resized = resize_drill(&drill, 1.0, 2.0).unwrap();
    assert_eq!(resized.center(), drill.center());
    assert!((resized.size() - 2.0).abs() < 1e-12);
}

#[test]
fn test_drill_shrink() {
    let drill = make_drill(Point::new(0.0, 0.0), 1.6).unwrap();
    let resized = resize_drill(&drill, 1.6, 0.4).unwrap();
    assert!((resized.size() - 0.4).abs() < 1e-12);
}

#[test]
fn test_wider_slot_keeps_overall_length() {
    let s = slot(Point::new(1.0, 1.0), 0.5, 6.0, SlotOrientation::X, 0.0);
    let engine = ResizeEngine::default();
    let resized = engine.resize_slot(&s, 1.5).unwrap();
    let b = resized.bounds();
    assert!((b.width() - 6.0).abs() < TOLERANCE);
    assert!((b.height() - 1.5).abs() < TOLERANCE);
    assert!(b.center().approx_eq(&Point::new(1.0, 1.0), TOLERANCE));
}

#[test]
fn test_resize_preserves_area_model() {
    // stadium area: (L - d) * d + pi * d^2 / 4
    let s = slot(Point::new(0.0, 0.0), 1.0, 5.0, SlotOrientation::Y, 0.0);
    let resized = ResizeEngine::default().resize_slot(&s, 2.0).unwrap();
    let expected = 3.0 * 2.0 + std::f64::consts::PI;
    let area = PlanarKernel.area(&resized.outline);
    assert!((area - expected).abs() / expected < 0.01);
}

#[test]
fn test_medial_chord_of_angled_slot() {
    let s = slot(Point::new(0.0, 0.0), 1.0, 10.0, SlotOrientation::Angle, 60.0);
    let medial = ResizeEngine::default().medial_chord(&s.outline).unwrap();
    assert!((medial.length() - 10.0).abs() < TOLERANCE);
    assert!(medial.chord.midpoint().approx_eq(&Point::new(0.0, 0.0), TOLERANCE));
    // clockwise 60 degrees means the probe sits at 300 or 120 degrees
    let dir = (medial.chord.end.y - medial.chord.start.y)
        .atan2(medial.chord.end.x - medial.chord.start.x)
        .to_degrees()
        .rem_euclid(180.0);
    assert!((dir - 120.0).abs() < 1.0);
}

#[test]
fn test_generic_resize_dispatch() {
    let engine = ResizeEngine::new(32);
    let drill: ExcShape = make_drill(Point::new(0.0, 0.0), 1.0).unwrap().into();
    let resized = engine.resize(&drill, 1.0, 3.0).unwrap();
    assert!(resized.is_drill());
    assert!((resized.bounds().width() - 3.0).abs() < 1e-12);

    let s: ExcShape = slot(Point::new(0.0, 0.0), 1.0, 4.0, SlotOrientation::X, 0.0).into();
    assert!(engine.resize(&s, 1.0, 0.5).unwrap().is_slot());
}

#[test]
fn test_resize_rejects_zero_target() {
    let s = slot(Point::new(0.0, 0.0), 1.0, 4.0, SlotOrientation::X, 0.0);
    assert!(matches!(
        ResizeEngine::default().resize_slot(&s, 0.0),
        Err(GeometryError::InvalidResize { .. })
    ));
}
