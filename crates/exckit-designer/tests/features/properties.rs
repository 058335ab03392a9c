use exckit_core::{ArrayDirection, GeometryError, LinearAxis, Point, SlotOrientation};
use exckit_designer::arrays::{circular_array, linear_array, CircularArrayParams, LinearArrayParams};
use exckit_designer::primitives::{make_drill, make_slot, SlotParams};
use exckit_designer::resize::ResizeEngine;
use proptest::prelude::*;

proptest! {
    #[test]
    fn drill_segments_are_perpendicular_and_sized(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        d in 0.01f64..10.0,
    ) {
        let c = Point::new(x, y);
        let drill = make_drill(c, d).unwrap();
        let [h, v] = drill.segments;
        prop_assert!((h.length() - d).abs() < 1e-9);
        prop_assert!((v.length() - d).abs() < 1e-9);
        prop_assert!(h.midpoint().approx_eq(&c, 1e-9));
        prop_assert!(v.midpoint().approx_eq(&c, 1e-9));
        let dot = (h.end.x - h.start.x) * (v.end.x - v.start.x)
            + (h.end.y - h.start.y) * (v.end.y - v.start.y);
        prop_assert!(dot.abs() < 1e-9);
    }

    #[test]
    fn x_slot_bounds_match_length_and_width(
        d in 0.1f64..3.0,
        extra in 0.0f64..20.0,
    ) {
        let length = d + extra;
        let slot = make_slot(
            Point::new(1.0, 2.0),
            &SlotParams::new(d, length, SlotOrientation::X, 0.0, 64),
        ).unwrap();
        let b = slot.bounds();
        prop_assert!((b.width() - length).abs() < 1e-9);
        prop_assert!((b.height() - d).abs() < 1e-9);
    }

    #[test]
    fn same_diameter_resize_keeps_bounds(
        d in 0.2f64..2.0,
        extra in 0.5f64..10.0,
    ) {
        let slot = make_slot(
            Point::new(0.0, 0.0),
            &SlotParams::new(d, d + extra, SlotOrientation::X, 0.0, 64),
        ).unwrap();
        let resized = ResizeEngine::new(64).resize_slot(&slot, d).unwrap();
        let (a, b) = (slot.bounds(), resized.bounds());
        let tolerance = 0.02 * (d + extra);
        prop_assert!((a.width() - b.width()).abs() < tolerance);
        prop_assert!((a.height() - b.height()).abs() < tolerance);
    }

    #[test]
    fn linear_x_centers_form_arithmetic_sequence(
        count in 1u32..30,
        pitch in 0.1f64..25.0,
    ) {
        let params = LinearArrayParams::new(LinearAxis::X, pitch, 0.0, count);
        let drills = linear_array(|p| make_drill(p, 0.5), Point::new(0.0, 0.0), &params).unwrap();
        prop_assert_eq!(drills.len(), count as usize);
        for pair in drills.windows(2) {
            prop_assert!((pair[1].center().x - pair[0].center().x - pitch).abs() < 1e-9);
        }
    }

    #[test]
    fn circular_overflow_always_fails(
        count in 1u32..50,
        step in 1.0f64..90.0,
    ) {
        prop_assume!(step * count as f64 > 360.0);
        let params = CircularArrayParams::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            ArrayDirection::Ccw,
            step,
            count,
        );
        let result = circular_array(|p| make_drill(p, 0.5), &params);
        let overflowed = matches!(result, Err(GeometryError::ArrayOverflow { .. }));
        prop_assert!(overflowed);
    }
}
