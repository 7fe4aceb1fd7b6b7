use crate::foundation::core::Canvas;
use crate::foundation::error::{TunnelError, TunnelResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Deepest tunnel [`ParameterSet::validate`] accepts.
pub const MAX_LAYERS: u32 = 100;

/// Direction the tunnel layers spin in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Visually clockwise on screen.
    #[default]
    Clockwise,
    /// Visually counter-clockwise on screen.
    #[serde(rename = "Counter-Clockwise", alias = "CounterClockwise")]
    CounterClockwise,
    /// No rotation.
    None,
}

/// Background point pattern drawn under the tunnel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarfieldPattern {
    /// No stars.
    #[default]
    None,
    /// Uniformly scattered stars.
    Random,
    /// Stars on an outward spiral that drifts with the frame index.
    Spiral,
}

/// Axis the wave warp displaces along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveDirection {
    /// Wave warp disabled.
    #[default]
    None,
    /// Rows shift horizontally.
    Horizontal,
    /// Columns shift vertically.
    Vertical,
}

/// Whole-frame zoom behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalZoomMode {
    /// No zoom.
    None,
    /// Scale grows linearly with progress.
    Linear,
    /// Scale breathes sinusoidally around a midpoint.
    #[default]
    Oscillating,
}

/// Full configuration of one animation run.
///
/// Deserialized from JSON with every field optional; missing fields take the defaults of
/// [`ParameterSet::default`]. The pipeline only ever reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterSet {
    /// Source raster file.
    pub source_image_path: PathBuf,
    /// Number of frames in the loop (>= 1).
    pub frame_count: u32,
    /// Spin direction of the tunnel layers.
    pub rotation_direction: RotationDirection,
    /// Rotation budget; `round(speed / 2)` full turns over the whole loop.
    pub rotation_speed: f64,

    /// Maximum tunnel depth, at most [`MAX_LAYERS`].
    pub max_layers: u32,
    /// Per-layer shrink ratio in `(0, 1]`.
    pub scale_decay: f64,

    /// Number of stars.
    pub star_count: u32,
    /// Star layout.
    pub starfield_pattern: StarfieldPattern,
    /// Seed for the random starfield.
    pub star_seed: u64,

    /// Mosaic block size; 0 and 1 disable the stage.
    pub pixelation_level: u32,
    /// Invert every Nth frame; 0 disables.
    pub color_invert_period: u32,
    /// Wave displacement in pixels.
    pub wave_amplitude: f64,
    /// Wave spatial frequency in radians per pixel.
    pub wave_frequency: f64,
    /// Wave displacement axis.
    pub wave_direction: WaveDirection,
    /// Gaussian sigma; 0 disables.
    pub blur_radius: f64,
    /// Hue degrees (in the 0..180 convention) added per frame.
    pub hue_speed: f64,
    /// Saturation pulse depth; 0 disables the hue stage entirely.
    pub hue_intensity: f64,

    /// Whole-frame zoom behaviour.
    pub global_zoom_mode: GlobalZoomMode,
    /// Linear zoom: scale added over the whole loop.
    pub linear_zoom_speed: f64,
    /// Oscillating zoom: sine amplitude.
    pub oscillating_amplitude: f64,
    /// Oscillating zoom: cycles over the whole loop.
    pub oscillating_frequency: f64,
    /// Oscillating zoom: scale at rest.
    pub oscillating_midpoint: f64,

    /// Resolution the source is normalized to before synthesis.
    pub working_size: Canvas,
    /// Per-frame display delay handed to the encoder, in centiseconds.
    pub frame_delay_cs: u16,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            source_image_path: PathBuf::new(),
            frame_count: 60,
            rotation_direction: RotationDirection::Clockwise,
            rotation_speed: 3.6,
            max_layers: 10,
            scale_decay: 0.85,
            star_count: 0,
            starfield_pattern: StarfieldPattern::None,
            star_seed: 0,
            pixelation_level: 0,
            color_invert_period: 0,
            wave_amplitude: 0.0,
            wave_frequency: 0.0,
            wave_direction: WaveDirection::None,
            blur_radius: 0.0,
            hue_speed: 3.6,
            hue_intensity: 1.0,
            global_zoom_mode: GlobalZoomMode::Oscillating,
            linear_zoom_speed: 0.5,
            oscillating_amplitude: 0.1,
            oscillating_frequency: 1.0,
            oscillating_midpoint: 1.0,
            working_size: Canvas::new(600, 600),
            frame_delay_cs: 8,
        }
    }
}

impl ParameterSet {
    /// Parse a parameter set from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TunnelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TunnelError::validation(format!("parse parameter JSON: {e}")))
    }

    /// Parse a parameter set from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TunnelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TunnelError::validation(format!("open parameter JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> TunnelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TunnelError::validation(format!("serialize parameter JSON: {e}")))
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> TunnelResult<()> {
        if self.frame_count == 0 {
            return Err(TunnelError::validation("frame_count must be >= 1"));
        }
        if !(self.scale_decay.is_finite() && self.scale_decay > 0.0 && self.scale_decay <= 1.0) {
            return Err(TunnelError::validation("scale_decay must be in (0, 1]"));
        }
        if self.max_layers > MAX_LAYERS {
            return Err(TunnelError::validation(format!(
                "max_layers must be <= {MAX_LAYERS}"
            )));
        }
        if self.working_size.width == 0 || self.working_size.height == 0 {
            return Err(TunnelError::validation("working_size must be non-zero"));
        }
        if self.frame_delay_cs == 0 {
            return Err(TunnelError::validation("frame_delay_cs must be >= 1"));
        }

        for (name, v) in [
            ("rotation_speed", self.rotation_speed),
            ("wave_amplitude", self.wave_amplitude),
            ("wave_frequency", self.wave_frequency),
            ("blur_radius", self.blur_radius),
            ("hue_intensity", self.hue_intensity),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(TunnelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, v) in [
            ("hue_speed", self.hue_speed),
            ("linear_zoom_speed", self.linear_zoom_speed),
            ("oscillating_amplitude", self.oscillating_amplitude),
            ("oscillating_frequency", self.oscillating_frequency),
            ("oscillating_midpoint", self.oscillating_midpoint),
        ] {
            if !v.is_finite() {
                return Err(TunnelError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// Total signed rotation, in degrees, spread across the whole loop.
    ///
    /// Whole turns only, so the last frame flows back into the first.
    pub fn total_rotation_degrees(&self) -> f64 {
        let turns = (self.rotation_speed / 2.0).round();
        match self.rotation_direction {
            RotationDirection::Clockwise => turns * 360.0,
            RotationDirection::CounterClockwise => -turns * 360.0,
            RotationDirection::None => 0.0,
        }
    }

    /// Rotation step between consecutive frames, in degrees.
    pub fn angle_per_frame(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.total_rotation_degrees() / f64::from(self.frame_count)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/params.rs"]
mod tests;
