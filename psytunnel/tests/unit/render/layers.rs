use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];

fn spec(max_layers: u32, scale_decay: f64, angle_per_frame: f64) -> TunnelSpec {
    TunnelSpec {
        max_layers,
        scale_decay,
        angle_per_frame,
    }
}

#[test]
fn zero_layers_leave_frame_untouched() {
    let src = Raster::filled(10, 10, RED);
    let mut frame = Raster::transparent(10, 10);
    assert_eq!(
        composite_tunnel(&mut frame, &src, spec(0, 0.5, 0.0), FrameIndex(0)),
        0
    );
    assert!(frame.is_fully_transparent());
}

#[test]
fn layer_loop_stops_at_minimum_size() {
    let src = Raster::filled(16, 16, RED);
    let mut frame = Raster::transparent(16, 16);
    // 16, 8, 4, 2, then 1 < MIN_LAYER_PX stops the loop.
    let painted = composite_tunnel(&mut frame, &src, spec(50, 0.5, 0.0), FrameIndex(0));
    assert_eq!(painted, 4);
}

#[test]
fn unrotated_opaque_layers_cover_the_frame() {
    let src = Raster::filled(20, 20, RED);
    let mut frame = Raster::transparent(20, 20);
    composite_tunnel(&mut frame, &src, spec(3, 0.5, 0.0), FrameIndex(7));
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px[3], 255);
        assert!(px[0] >= 250 && px[1] <= 5 && px[2] <= 5, "{px:?}");
    }
}

#[test]
fn inner_layers_are_centered() {
    // A source with a transparent hole in the middle: only the shrunken copy paints into it.
    let mut src = Raster::filled(40, 40, RED);
    for y in 10..30 {
        for x in 10..30 {
            src.set_pixel(x, y, [0, 0, 0, 0]);
        }
    }
    let mut frame = Raster::transparent(40, 40);
    composite_tunnel(&mut frame, &src, spec(2, 0.5, 0.0), FrameIndex(0));

    // The 20x20 second layer sits at (10..30) with its own opaque ring on the outside.
    assert!(frame.pixel(10, 10)[3] > 200);
    assert!(frame.pixel(29, 29)[3] > 200);
    // Its center is its own hole.
    assert_eq!(frame.pixel(20, 20)[3], 0);
}

#[test]
fn angle_is_a_pure_function_of_the_frame_index() {
    let s = spec(4, 0.8, 12.0);
    assert_eq!(s.angle_at(FrameIndex(5)), 60.0);

    let src = {
        let mut r = Raster::transparent(24, 24);
        for y in 0..24 {
            for x in 0..12 {
                r.set_pixel(x, y, RED);
            }
        }
        r
    };
    let mut direct = Raster::transparent(24, 24);
    composite_tunnel(&mut direct, &src, s, FrameIndex(5));

    let mut last = Raster::transparent(24, 24);
    for i in 0..=5 {
        last = Raster::transparent(24, 24);
        composite_tunnel(&mut last, &src, s, FrameIndex(i));
    }
    assert_eq!(direct, last);
}

#[test]
fn full_turn_rotation_matches_unrotated() {
    let mut src = Raster::transparent(16, 16);
    src.set_pixel(1, 1, RED);
    let mut a = Raster::transparent(16, 16);
    let mut b = Raster::transparent(16, 16);
    composite_tunnel(&mut a, &src, spec(1, 1.0, 360.0), FrameIndex(1));
    composite_tunnel(&mut b, &src, spec(1, 1.0, 0.0), FrameIndex(1));
    assert_eq!(a, b);
}

#[test]
fn paste_outside_frame_is_skipped() {
    let layer = Raster::filled(4, 4, RED);
    let mut frame = Raster::transparent(8, 8);
    assert!(!paste_over(&mut frame, &layer, 8, 0));
    assert!(!paste_over(&mut frame, &layer, -4, -4));
    assert!(frame.is_fully_transparent());

    assert!(paste_over(&mut frame, &layer, -2, -2));
    assert_eq!(frame.pixel(1, 1), RED);
    assert_eq!(frame.pixel(2, 2)[3], 0);
}

/// 21x21 transparent raster with a 3x3 red marker at 12 o'clock.
fn marker_at_top() -> Raster {
    let mut src = Raster::transparent(21, 21);
    for y in 1..4 {
        for x in 9..12 {
            src.set_pixel(x, y, RED);
        }
    }
    src
}

#[test]
fn positive_angle_turns_clockwise_on_screen() {
    let src = marker_at_top();
    let mut frame = Raster::transparent(21, 21);
    composite_tunnel(&mut frame, &src, spec(1, 1.0, 90.0), FrameIndex(1));
    // 12 o'clock moves to 3 o'clock.
    assert!(frame.pixel(18, 10)[3] > 200, "{:?}", frame.pixel(18, 10));
    assert_eq!(frame.pixel(10, 2)[3], 0);
    assert_eq!(frame.pixel(2, 10)[3], 0);
}

#[test]
fn negative_angle_turns_counter_clockwise_on_screen() {
    let src = marker_at_top();
    let mut frame = Raster::transparent(21, 21);
    composite_tunnel(&mut frame, &src, spec(1, 1.0, -90.0), FrameIndex(1));
    // 12 o'clock moves to 9 o'clock.
    assert!(frame.pixel(2, 10)[3] > 200, "{:?}", frame.pixel(2, 10));
    assert_eq!(frame.pixel(10, 2)[3], 0);
    assert_eq!(frame.pixel(18, 10)[3], 0);
}

#[test]
fn rotation_direction_sets_the_angle_sign() {
    use crate::config::params::{ParameterSet, RotationDirection};

    let base = ParameterSet {
        frame_count: 4,
        rotation_speed: 2.0,
        ..ParameterSet::default()
    };
    let cw = ParameterSet {
        rotation_direction: RotationDirection::Clockwise,
        ..base.clone()
    };
    let ccw = ParameterSet {
        rotation_direction: RotationDirection::CounterClockwise,
        ..base
    };
    assert_eq!(cw.angle_per_frame(), 90.0);
    assert_eq!(ccw.angle_per_frame(), -90.0);
}
