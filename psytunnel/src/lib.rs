//! Psytunnel renders seamlessly looping "psychedelic tunnel" animations from a single image.
//!
//! Every frame is a pure function of the source image, the frame index and a read-only
//! [`ParameterSet`]:
//!
//! - Load a [`SourceImage`] at the working resolution
//! - Synthesize frames with a [`FrameSynthesizer`] (starfield, tunnel layers, zoom, post effects)
//! - Or let an [`AnimationDriver`] stream the whole loop into a [`FrameSink`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Source image loading.
pub mod assets;
/// Run parameters, JSON boundary and presets.
pub mod config;
/// Post effects applied after zoom.
pub mod effects;
/// Frame sinks (in-memory, PNG sequence, ffmpeg GIF).
pub mod encode;
/// Core types, errors and pixel math.
pub mod foundation;
/// Frame synthesis.
pub mod render;
/// Animation driver.
pub mod session;
/// Affine warps and resampling.
pub mod transform;

pub use crate::foundation::core::{Affine, Canvas, FrameIndex, Point, Raster, Rgba8, Vec2};
pub use crate::foundation::error::{TunnelError, TunnelResult};

pub use crate::assets::source::SourceImage;
pub use crate::config::params::{
    GlobalZoomMode, ParameterSet, RotationDirection, StarfieldPattern, WaveDirection,
};
pub use crate::effects::chain::{PostFx, PostFxChain};
pub use crate::encode::ffmpeg::{FfmpegGifSink, FfmpegGifSinkOpts};
pub use crate::encode::png_seq::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::context::FrameContext;
pub use crate::render::frame::FrameSynthesizer;
pub use crate::session::driver::{
    AnimationDriver, CancelToken, DriverOpts, DriverState, NullProgress, ProgressEvent,
    ProgressSink, RunOutcome, Terminal,
};
