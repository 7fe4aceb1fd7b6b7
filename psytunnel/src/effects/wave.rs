use crate::config::params::WaveDirection;
use crate::foundation::core::{FrameIndex, Raster};
use crate::transform::sample::BorderMode;
use crate::transform::warp::remap;

/// Phase advance of the wave per frame, in radians.
pub const WAVE_PHASE_PER_FRAME: f64 = 0.1;

/// Sinusoidal displacement parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSpec {
    /// Peak displacement in pixels.
    pub amplitude: f64,
    /// Spatial frequency in radians per pixel.
    pub frequency: f64,
    /// Displacement axis.
    pub direction: WaveDirection,
}

impl WaveSpec {
    /// `true` when the warp would change pixels.
    pub fn is_active(&self) -> bool {
        self.amplitude > 0.0 && self.frequency > 0.0 && self.direction != WaveDirection::None
    }
}

/// Ripple `frame` along the wave direction.
///
/// Horizontal: `src_x = x + A * sin(y * f + frame * 0.1)`; vertical swaps the axes.
/// Bilinear sampling with edge replication.
pub fn wave_warp(frame: Raster, spec: WaveSpec, index: FrameIndex) -> Raster {
    if !spec.is_active() {
        return frame;
    }
    let phase = index.0 as f64 * WAVE_PHASE_PER_FRAME;
    let WaveSpec {
        amplitude,
        frequency,
        direction,
    } = spec;
    let canvas = frame.canvas();

    match direction {
        WaveDirection::Horizontal => remap(&frame, canvas, BorderMode::Replicate, |x, y| {
            (x + amplitude * (y * frequency + phase).sin(), y)
        }),
        WaveDirection::Vertical => remap(&frame, canvas, BorderMode::Replicate, |x, y| {
            (x, y + amplitude * (x * frequency + phase).sin())
        }),
        WaveDirection::None => frame,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/wave.rs"]
mod tests;
