use super::*;

fn stripes(w: u32, h: u32) -> Raster {
    let mut r = Raster::transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = if (x / 2 + y / 3) % 2 == 0 { 0 } else { 255 };
            r.set_pixel(x, y, [v, 255 - v, 128, 255]);
        }
    }
    r
}

#[test]
fn zero_amplitude_is_a_no_op_for_every_direction_and_frequency() {
    let r = stripes(16, 16);
    for direction in [
        WaveDirection::None,
        WaveDirection::Horizontal,
        WaveDirection::Vertical,
    ] {
        for frequency in [0.0, 0.1, 0.33, 2.0] {
            let spec = WaveSpec {
                amplitude: 0.0,
                frequency,
                direction,
            };
            assert_eq!(wave_warp(r.clone(), spec, FrameIndex(3)), r);
        }
    }
}

#[test]
fn disabled_direction_or_frequency_is_a_no_op() {
    let r = stripes(8, 8);
    let none = WaveSpec {
        amplitude: 3.0,
        frequency: 0.3,
        direction: WaveDirection::None,
    };
    assert_eq!(wave_warp(r.clone(), none, FrameIndex(0)), r);
    let flat = WaveSpec {
        frequency: 0.0,
        direction: WaveDirection::Horizontal,
        ..none
    };
    assert_eq!(wave_warp(r.clone(), flat, FrameIndex(0)), r);
}

#[test]
fn horizontal_wave_shifts_rows_by_the_sine_offset() {
    let r = stripes(32, 8);
    // y = 0, frame 0: offset is A * sin(0) = 0, so row 0 is unchanged.
    let spec = WaveSpec {
        amplitude: 2.0,
        frequency: std::f64::consts::FRAC_PI_2,
        direction: WaveDirection::Horizontal,
    };
    let out = wave_warp(r.clone(), spec, FrameIndex(0));
    for x in 0..32 {
        assert_eq!(out.pixel(x, 0), r.pixel(x, 0));
    }
    // y = 1: sin(pi/2) = 1, so out(x, 1) = in(x + 2, 1) away from the right edge.
    for x in 0..28 {
        assert_eq!(out.pixel(x, 1), r.pixel(x + 2, 1));
    }
}

#[test]
fn vertical_wave_replicates_edges() {
    let r = stripes(8, 8);
    let spec = WaveSpec {
        amplitude: 100.0,
        frequency: std::f64::consts::FRAC_PI_2,
        direction: WaveDirection::Vertical,
    };
    let out = wave_warp(r.clone(), spec, FrameIndex(0));
    // x = 1 samples far below the frame: clamped to the bottom row.
    for y in 0..8 {
        assert_eq!(out.pixel(1, y), r.pixel(1, 7));
    }
    assert!(out.data.chunks_exact(4).all(|px| px[3] == 255));
}
