use super::*;
use crate::foundation::core::Canvas;

fn osc(amplitude: f64, frequency: f64, midpoint: f64) -> ZoomSpec {
    ZoomSpec {
        mode: GlobalZoomMode::Oscillating,
        linear_speed: 0.0,
        amplitude,
        frequency,
        midpoint,
    }
}

#[test]
fn none_mode_is_unit_scale() {
    let z = ZoomSpec {
        mode: GlobalZoomMode::None,
        ..osc(0.4, 2.0, 0.8)
    };
    assert_eq!(z.scale_at(0.0), 1.0);
    assert_eq!(z.scale_at(0.7), 1.0);
}

#[test]
fn linear_mode_grows_with_progress() {
    let z = ZoomSpec {
        mode: GlobalZoomMode::Linear,
        linear_speed: 0.5,
        ..osc(0.0, 0.0, 0.0)
    };
    assert_eq!(z.scale_at(0.0), 1.0);
    assert!((z.scale_at(0.5) - 1.25).abs() < 1e-12);
}

#[test]
fn oscillating_starts_at_midpoint_and_is_periodic() {
    let z = osc(0.3, 2.0, 0.9);
    assert!((z.scale_at(0.0) - 0.9).abs() < 1e-12);
    assert!((z.scale_at(0.125) - 1.2).abs() < 1e-12);
    let period = 1.0 / 2.0;
    for p in [0.05, 0.13, 0.31] {
        assert!((z.scale_at(p) - z.scale_at(p + period)).abs() < 1e-9);
    }
}

#[test]
fn unit_scale_returns_frame_unchanged() {
    let mut r = Raster::transparent(5, 5);
    r.set_pixel(0, 0, [1, 2, 3, 4]);
    assert_eq!(apply_zoom(r.clone(), 1.0), r);
}

#[test]
fn zoom_keeps_dimensions_and_center() {
    let mut r = Raster::filled(9, 9, [0, 0, 0, 255]);
    r.set_pixel(4, 4, [255, 255, 255, 255]);
    let canvas = Canvas::new(9, 9);
    for s in [0.5, 2.0, 0.0, -3.0, f64::NAN] {
        let out = apply_zoom(r.clone(), s);
        assert_eq!(out.canvas(), canvas);
    }
}

#[test]
fn zooming_out_reflects_instead_of_exposing_transparency() {
    let r = Raster::filled(10, 10, [10, 200, 30, 255]);
    let out = apply_zoom(r, 0.5);
    assert!(out.data.chunks_exact(4).all(|px| px == [10, 200, 30, 255]));
}

#[test]
fn zooming_in_magnifies_about_the_center() {
    let mut r = Raster::transparent(8, 8);
    for y in 0..8 {
        for x in 0..8 {
            let v = if x < 4 { 0 } else { 255 };
            r.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    let out = apply_zoom(r, 2.0);
    // Source x = 4 + (x - 4) / 2: dst 0 -> src 2 (dark), dst 7 -> src 5.5 (light).
    assert_eq!(out.pixel(0, 4)[0], 0);
    assert_eq!(out.pixel(7, 4)[0], 255);
}
