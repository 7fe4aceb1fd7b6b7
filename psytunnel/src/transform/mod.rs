//! Resampling primitives shared by the geometric stages.

/// Border handling and bilinear sampling.
pub mod sample;
/// Affine warps and per-pixel remaps.
pub mod warp;
