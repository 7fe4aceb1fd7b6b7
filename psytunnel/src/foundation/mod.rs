/// Core value types shared by every stage (frame indices, canvas, rasters).
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
/// Pixel math helpers (alpha blending, HSV conversions).
pub mod math;
