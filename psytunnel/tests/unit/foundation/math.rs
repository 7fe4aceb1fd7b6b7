use super::*;

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(
        over_straight([10, 20, 30, 255], [200, 100, 50, 255]),
        [200, 100, 50, 255]
    );
}

#[test]
fn over_transparent_src_keeps_dst() {
    assert_eq!(
        over_straight([10, 20, 30, 128], [200, 100, 50, 0]),
        [10, 20, 30, 128]
    );
}

#[test]
fn over_onto_transparent_keeps_src_color_and_alpha() {
    assert_eq!(
        over_straight([0, 0, 0, 0], [200, 100, 50, 128]),
        [200, 100, 50, 128]
    );
}

#[test]
fn over_half_alpha_mixes_toward_src() {
    let out = over_straight([0, 0, 0, 255], [255, 255, 255, 128]);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 128).abs() <= 1);
}

#[test]
fn hsv_primaries_use_180_hue_range() {
    assert_eq!(rgb_to_hsv8(255, 0, 0), [0, 255, 255]);
    assert_eq!(rgb_to_hsv8(0, 255, 0), [60, 255, 255]);
    assert_eq!(rgb_to_hsv8(0, 0, 255), [120, 255, 255]);
    assert_eq!(rgb_to_hsv8(0, 0, 0), [0, 0, 0]);
    assert_eq!(rgb_to_hsv8(128, 128, 128), [0, 0, 128]);
}

#[test]
fn hsv_round_trip_is_close() {
    for &(r, g, b) in &[
        (255u8, 0u8, 0u8),
        (12, 200, 99),
        (250, 250, 10),
        (40, 80, 160),
        (1, 2, 3),
    ] {
        let [h, s, v] = rgb_to_hsv8(r, g, b);
        let [r2, g2, b2] = hsv8_to_rgb(h, s, v);
        for (a, b) in [(r, r2), (g, g2), (b, b2)] {
            assert!((i32::from(a) - i32::from(b)).abs() <= 6, "{a} vs {b}");
        }
    }
}

#[test]
fn saturate_clamps_and_rounds() {
    assert_eq!(saturate_u8(-4.0), 0);
    assert_eq!(saturate_u8(254.6), 255);
    assert_eq!(saturate_u8(1e9), 255);
    assert_eq!(saturate_u8(f64::NAN), 0);
}
