use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::ensure_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::{TunnelError, TunnelResult};

/// Writes every frame as `<dir>/<stem>_frame_NNNN.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    stem: String,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` with file names prefixed by `stem`.
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// File name used for frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_frame_{:04}.png", self.stem, idx.0))
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> TunnelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TunnelError::validation(
                "png sequence width/height must be non-zero",
            ));
        }
        ensure_dir(&self.dir)?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> TunnelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| TunnelError::encoding("png sequence sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TunnelError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let path = self.frame_path(idx);
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| TunnelError::encoding(format!("write png '{}': {e}", path.display())))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> TunnelResult<()> {
        tracing::debug!(
            dir = %self.dir.display(),
            frames = self.written.len(),
            "png sequence finished"
        );
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png_seq.rs"]
mod tests;
