use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::params::StarfieldPattern;
use crate::foundation::core::{FrameIndex, Raster};

/// Star disc radius in pixels.
const STAR_RADIUS: i64 = 1;
const STAR_RGB: [u8; 3] = [255, 255, 255];
const SPIRAL_ANGLE_STEP: f64 = 0.1;
const SPIRAL_DRIFT_PER_FRAME: f64 = 0.05;
const SPIRAL_RADIUS_STEP: f64 = 2.0;

/// Inputs for one starfield pass.
#[derive(Clone, Copy, Debug)]
pub struct StarfieldSpec {
    /// Number of stars to place.
    pub count: u32,
    /// Layout of the stars.
    pub pattern: StarfieldPattern,
    /// Run-level seed; combined with the frame index for per-frame twinkle.
    pub seed: u64,
}

/// Draw the starfield for `frame` onto `canvas`.
///
/// Stars overwrite whatever is underneath. Spiral points falling outside the canvas are
/// dropped, never clamped.
pub fn render_starfield(canvas: &mut Raster, spec: StarfieldSpec, frame: FrameIndex) {
    if spec.count == 0 || canvas.width == 0 || canvas.height == 0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(frame_seed(spec.seed, frame));

    match spec.pattern {
        StarfieldPattern::None => {}
        StarfieldPattern::Random => {
            for _ in 0..spec.count {
                let x = rng.random_range(0..canvas.width);
                let y = rng.random_range(0..canvas.height);
                let alpha = star_alpha(&mut rng);
                draw_disc(canvas, i64::from(x), i64::from(y), alpha);
            }
        }
        StarfieldPattern::Spiral => {
            let cx = f64::from(canvas.width) / 2.0;
            let cy = f64::from(canvas.height) / 2.0;
            for j in 0..spec.count {
                let j = f64::from(j);
                let angle = SPIRAL_ANGLE_STEP * j + SPIRAL_DRIFT_PER_FRAME * frame.0 as f64;
                let radius = SPIRAL_RADIUS_STEP * j;
                // Truncation toward zero matches integer pixel placement.
                let x = (cx + radius * angle.cos()) as i64;
                let y = (cy + radius * angle.sin()) as i64;
                if x < 0 || y < 0 || x >= i64::from(canvas.width) || y >= i64::from(canvas.height)
                {
                    continue;
                }
                let alpha = star_alpha(&mut rng);
                draw_disc(canvas, x, y, alpha);
            }
        }
    }
}

fn frame_seed(seed: u64, frame: FrameIndex) -> u64 {
    seed ^ frame.0.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn star_alpha(rng: &mut StdRng) -> u8 {
    (255.0 * rng.random_range(0.5..=1.0f64)) as u8
}

fn draw_disc(canvas: &mut Raster, cx: i64, cy: i64, alpha: u8) {
    let px = [STAR_RGB[0], STAR_RGB[1], STAR_RGB[2], alpha];
    for dy in -STAR_RADIUS..=STAR_RADIUS {
        for dx in -STAR_RADIUS..=STAR_RADIUS {
            if dx * dx + dy * dy > STAR_RADIUS * STAR_RADIUS {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || y < 0 || x >= i64::from(canvas.width) || y >= i64::from(canvas.height) {
                continue;
            }
            canvas.set_pixel(x as u32, y as u32, px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/starfield.rs"]
mod tests;
