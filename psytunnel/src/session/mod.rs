//! Run orchestration: load, synthesize every frame, deliver to a sink.

/// Animation driver, progress events and cancellation.
pub mod driver;
