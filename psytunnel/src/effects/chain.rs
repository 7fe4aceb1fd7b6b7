use crate::config::params::ParameterSet;
use crate::effects::blur::gaussian_blur;
use crate::effects::hue::{HueSpec, hue_cycle};
use crate::effects::invert::{invert_rgb, inverts_at};
use crate::effects::pixelate::pixelate;
use crate::effects::wave::{WaveSpec, wave_warp};
use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::TunnelResult;

/// One full-frame post effect.
#[derive(Clone, Debug, PartialEq)]
pub enum PostFx {
    /// Mosaic into `level` x `level` blocks.
    Pixelate {
        /// Block size in pixels, always >= 2.
        level: u32,
    },
    /// Sinusoidal displacement.
    Wave(WaveSpec),
    /// Hue rotation with saturation pulse.
    Hue(HueSpec),
    /// RGB inversion on every `period`-th frame.
    Invert {
        /// Inversion period in frames, always >= 1.
        period: u32,
    },
    /// Gaussian blur.
    Blur {
        /// Standard deviation in pixels.
        sigma: f64,
    },
}

impl PostFx {
    /// Short stage name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            PostFx::Pixelate { .. } => "pixelate",
            PostFx::Wave(_) => "wave",
            PostFx::Hue(_) => "hue",
            PostFx::Invert { .. } => "invert",
            PostFx::Blur { .. } => "blur",
        }
    }

    fn apply(&self, frame: Raster, index: FrameIndex, progress: f64) -> TunnelResult<Raster> {
        Ok(match *self {
            PostFx::Pixelate { level } => pixelate(frame, level),
            PostFx::Wave(spec) => wave_warp(frame, spec, index),
            PostFx::Hue(spec) => hue_cycle(frame, spec, index, progress),
            PostFx::Invert { period } => {
                if inverts_at(period, index) {
                    invert_rgb(frame)
                } else {
                    frame
                }
            }
            PostFx::Blur { sigma } => gaussian_blur(frame, sigma)?,
        })
    }
}

/// Enabled post effects in their fixed application order:
/// pixelate, wave, hue, invert, blur.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostFxChain {
    /// Stages in application order.
    pub passes: Vec<PostFx>,
}

impl PostFxChain {
    /// Build the chain, dropping stages whose parameters disable them.
    pub fn from_params(params: &ParameterSet) -> Self {
        let mut passes = Vec::new();

        if params.pixelation_level > 1 {
            passes.push(PostFx::Pixelate {
                level: params.pixelation_level,
            });
        }
        let wave = WaveSpec {
            amplitude: params.wave_amplitude,
            frequency: params.wave_frequency,
            direction: params.wave_direction,
        };
        if wave.is_active() {
            passes.push(PostFx::Wave(wave));
        }
        let hue = HueSpec {
            speed: params.hue_speed,
            intensity: params.hue_intensity,
        };
        if hue.is_active() {
            passes.push(PostFx::Hue(hue));
        }
        if params.color_invert_period > 0 {
            passes.push(PostFx::Invert {
                period: params.color_invert_period,
            });
        }
        if params.blur_radius > 0.0 {
            passes.push(PostFx::Blur {
                sigma: params.blur_radius,
            });
        }

        Self { passes }
    }

    /// `true` when no stage is enabled.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every stage over `frame` in order.
    pub fn apply(&self, frame: Raster, index: FrameIndex, progress: f64) -> TunnelResult<Raster> {
        self.passes
            .iter()
            .try_fold(frame, |f, fx| fx.apply(f, index, progress))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chain.rs"]
mod tests;
