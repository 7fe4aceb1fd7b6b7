//! Encoding sinks.
//!
//! Sinks receive finished frames in loop order from the animation driver. The container format
//! is owned by the sink, never by the frame pipeline.

/// `ffmpeg`-based GIF sink.
pub mod ffmpeg;
/// Numbered PNG sequence sink.
pub mod png_seq;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
