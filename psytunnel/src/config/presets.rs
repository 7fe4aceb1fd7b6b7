use crate::config::params::{ParameterSet, StarfieldPattern, WaveDirection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

impl ParameterSet {
    /// The showcase look: a shallow tunnel over a random starfield with a gentle ripple.
    ///
    /// Core settings (frame count, rotation, hue, zoom) keep their defaults.
    pub fn advanced_preset() -> Self {
        Self {
            max_layers: 5,
            blur_radius: 0.2,
            star_count: 110,
            pixelation_level: 0,
            color_invert_period: 18,
            wave_amplitude: 1.1,
            wave_frequency: 0.33,
            wave_direction: WaveDirection::Horizontal,
            starfield_pattern: StarfieldPattern::Random,
            ..Self::default()
        }
    }

    /// Scramble the effect settings of `self`, deterministically for a given `seed`.
    ///
    /// Only the effect stack is touched; the source path, frame count and the core motion
    /// settings survive.
    pub fn randomized(&self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let waves = [
            WaveDirection::None,
            WaveDirection::Horizontal,
            WaveDirection::Vertical,
        ];
        let patterns = [
            StarfieldPattern::Random,
            StarfieldPattern::Spiral,
            StarfieldPattern::None,
        ];

        Self {
            max_layers: rng.random_range(5..=20),
            blur_radius: f64::from(rng.random_range(0..=50u32)) / 10.0,
            star_count: rng.random_range(0..=200),
            pixelation_level: rng.random_range(0..=50),
            color_invert_period: rng.random_range(0..=60),
            wave_amplitude: f64::from(rng.random_range(0..=500u32)) / 10.0,
            wave_frequency: f64::from(rng.random_range(0..=100u32)) / 100.0,
            wave_direction: waves[rng.random_range(0..waves.len())],
            starfield_pattern: patterns[rng.random_range(0..patterns.len())],
            star_seed: rng.random(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/presets.rs"]
mod tests;
