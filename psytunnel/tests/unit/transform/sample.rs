use super::*;

#[test]
fn reflect101_mirrors_without_repeating_the_edge() {
    let m = BorderMode::Reflect101;
    assert_eq!(border_index(-1, 4, m), Some(1));
    assert_eq!(border_index(-2, 4, m), Some(2));
    assert_eq!(border_index(4, 4, m), Some(2));
    assert_eq!(border_index(5, 4, m), Some(1));
    assert_eq!(border_index(9, 4, m), Some(3));
    assert_eq!(border_index(-7, 1, m), Some(0));
}

#[test]
fn replicate_clamps_and_transparent_drops() {
    assert_eq!(border_index(-3, 4, BorderMode::Replicate), Some(0));
    assert_eq!(border_index(10, 4, BorderMode::Replicate), Some(3));
    assert_eq!(border_index(-1, 4, BorderMode::Transparent), None);
    assert_eq!(border_index(2, 4, BorderMode::Transparent), Some(2));
}

#[test]
fn integer_coordinates_sample_exact_pixels() {
    let mut r = Raster::transparent(3, 3);
    r.set_pixel(1, 2, [9, 8, 7, 6]);
    assert_eq!(
        sample_bilinear(&r, 1.0, 2.0, BorderMode::Transparent),
        [9, 8, 7, 6]
    );
}

#[test]
fn half_pixel_averages_neighbours() {
    let mut r = Raster::transparent(2, 1);
    r.set_pixel(0, 0, [0, 0, 0, 255]);
    r.set_pixel(1, 0, [200, 100, 50, 255]);
    let px = sample_bilinear(&r, 0.5, 0.0, BorderMode::Replicate);
    assert_eq!(px, [100, 50, 25, 255]);
}

#[test]
fn transparent_border_fades_alpha_at_edges() {
    let r = Raster::filled(2, 2, [255, 255, 255, 255]);
    let px = sample_bilinear(&r, -0.5, 0.0, BorderMode::Transparent);
    assert!((i32::from(px[3]) - 128).abs() <= 1);
}
