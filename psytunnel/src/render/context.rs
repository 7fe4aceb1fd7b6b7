use crate::config::params::ParameterSet;
use crate::effects::hue::HueSpec;
use crate::foundation::core::FrameIndex;
use crate::render::zoom::ZoomSpec;

/// Values derived once per frame from the index and the parameter set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Frame being synthesized.
    pub index: FrameIndex,
    /// Total frames in the loop.
    pub frame_count: u32,
    /// `index / frame_count`, in `[0, 1)`.
    pub progress: f64,
    /// Layer rotation in degrees.
    pub angle_deg: f64,
    /// Hue offset in the 0..180 convention.
    pub hue_shift: f64,
    /// Unclamped global zoom factor.
    pub zoom_scale: f64,
}

impl FrameContext {
    /// Derive the context of frame `index`.
    pub fn new(index: FrameIndex, params: &ParameterSet) -> Self {
        let frame_count = params.frame_count.max(1);
        let progress = index.0 as f64 / f64::from(frame_count);
        let hue = HueSpec {
            speed: params.hue_speed,
            intensity: params.hue_intensity,
        };
        Self {
            index,
            frame_count,
            progress,
            angle_deg: params.angle_per_frame() * index.0 as f64,
            hue_shift: hue.hue_offset(index),
            zoom_scale: zoom_spec(params).scale_at(progress),
        }
    }
}

pub(crate) fn zoom_spec(params: &ParameterSet) -> ZoomSpec {
    ZoomSpec {
        mode: params.global_zoom_mode,
        linear_speed: params.linear_zoom_speed,
        amplitude: params.oscillating_amplitude,
        frequency: params.oscillating_frequency,
        midpoint: params.oscillating_midpoint,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
