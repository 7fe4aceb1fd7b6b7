/// The run-time parameter record and its JSON boundary.
pub mod params;
/// Canned and randomized parameter sets.
pub mod presets;
