//! Per-frame post effects, applied in a fixed order after the zoom stage.

/// Separable Gaussian blur.
pub mod blur;
/// Ordered effect chain built from a parameter set.
pub mod chain;
/// Hue rotation and saturation pulse in 8-bit HSV.
pub mod hue;
/// Periodic RGB inversion.
pub mod invert;
/// Nearest-neighbour mosaic.
pub mod pixelate;
/// Sinusoidal displacement warp.
pub mod wave;
