use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::TunnelResult;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display time of each frame, in hundredths of a second.
    pub frame_delay_cs: u16,
}

/// Consumer of finished frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, between
/// one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frame is pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TunnelResult<()>;
    /// Accept one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> TunnelResult<()>;
    /// Called once after the last frame, including after a cancelled run.
    fn end(&mut self) -> TunnelResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Raster)>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, Raster)] {
        &self.frames
    }

    /// Take ownership of the captured frames.
    pub fn into_frames(self) -> Vec<(FrameIndex, Raster)> {
        self.frames
    }

    /// `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TunnelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> TunnelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TunnelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
