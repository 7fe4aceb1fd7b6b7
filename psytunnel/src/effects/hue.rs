use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::math::{hsv8_to_rgb, rgb_to_hsv8, saturate_u8};

/// Hue range of the 8-bit HSV convention.
pub const HUE_RANGE: f64 = 180.0;

/// Hue rotation and saturation pulse parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueSpec {
    /// Hue units (0..180 convention) added per frame.
    pub speed: f64,
    /// Saturation pulse depth; 1.0 keeps saturation steady.
    pub intensity: f64,
}

impl HueSpec {
    /// `true` when the stage runs at all.
    pub fn is_active(&self) -> bool {
        self.speed != 0.0 && self.intensity > 0.0
    }

    /// Hue offset for `index`, wrapped into `[0, 180)`.
    pub fn hue_offset(&self, index: FrameIndex) -> f64 {
        (index.0 as f64 * self.speed).rem_euclid(HUE_RANGE)
    }

    /// Saturation multiplier at `progress`.
    pub fn saturation_multiplier(&self, progress: f64) -> f64 {
        let pulse = (progress * 2.0 * std::f64::consts::PI * (self.speed / 4.0)).sin();
        1.0 + pulse * (self.intensity - 1.0)
    }
}

/// Rotate hue and pulse saturation of every pixel. Alpha is preserved.
pub fn hue_cycle(mut frame: Raster, spec: HueSpec, index: FrameIndex, progress: f64) -> Raster {
    if !spec.is_active() {
        return frame;
    }
    let offset = spec.hue_offset(index);
    let sat_mul = spec.saturation_multiplier(progress);

    for px in frame.data.chunks_exact_mut(4) {
        let [h, s, v] = rgb_to_hsv8(px[0], px[1], px[2]);
        // Truncation matches the 8-bit hue channel store.
        let h = (f64::from(h) + offset).rem_euclid(HUE_RANGE) as u8;
        let s = saturate_u8(f64::from(s) * sat_mul);
        let [r, g, b] = hsv8_to_rgb(h, s, v);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/effects/hue.rs"]
mod tests;
