use crate::config::params::GlobalZoomMode;
use crate::foundation::core::{Affine, Raster};
use crate::transform::sample::BorderMode;
use crate::transform::warp::warp_affine;

/// Smallest scale the zoom stage will apply.
pub const MIN_ZOOM_SCALE: f64 = 0.1;

/// Whole-frame zoom parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomSpec {
    /// Zoom behaviour.
    pub mode: GlobalZoomMode,
    /// Linear: scale added by the end of the loop.
    pub linear_speed: f64,
    /// Oscillating: sine amplitude.
    pub amplitude: f64,
    /// Oscillating: cycles per loop.
    pub frequency: f64,
    /// Oscillating: scale at rest.
    pub midpoint: f64,
}

impl ZoomSpec {
    /// Unclamped scale factor at `progress` in `[0, 1)`.
    pub fn scale_at(&self, progress: f64) -> f64 {
        match self.mode {
            GlobalZoomMode::None => 1.0,
            GlobalZoomMode::Linear => 1.0 + self.linear_speed * progress,
            GlobalZoomMode::Oscillating => {
                let phase = 2.0 * std::f64::consts::PI * self.frequency * progress;
                self.midpoint + self.amplitude * phase.sin()
            }
        }
    }
}

/// Scale `frame` uniformly about its center by `scale`.
///
/// Zoomed-out content is padded by mirroring the frame (reflect-101) instead of exposing hard
/// edges. A scale of exactly `1.0` returns the frame untouched; scales below
/// [`MIN_ZOOM_SCALE`] (or non-finite ones) are clamped.
pub fn apply_zoom(frame: Raster, scale: f64) -> Raster {
    if scale == 1.0 {
        return frame;
    }
    let scale = if scale.is_finite() {
        scale.max(MIN_ZOOM_SCALE)
    } else {
        MIN_ZOOM_SCALE
    };
    let canvas = frame.canvas();
    warp_affine(
        &frame,
        canvas,
        Affine::scale_about(scale, canvas.center()),
        BorderMode::Reflect101,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/zoom.rs"]
mod tests;
