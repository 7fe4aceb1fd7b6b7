//! Per-frame synthesis: starfield, tunnel layers and whole-frame zoom.

/// Per-frame derived values.
pub mod context;
/// Full frame pipeline.
pub mod frame;
/// Recursive rotated layer composite.
pub mod layers;
/// Seeded background stars.
pub mod starfield;
/// Whole-frame zoom.
pub mod zoom;
