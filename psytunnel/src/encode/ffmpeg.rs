use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::{TunnelError, TunnelResult};

/// Options for [`FfmpegGifSink`].
#[derive(Clone, Debug)]
pub struct FfmpegGifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Flatten alpha over this straight RGBA color. `None` keeps GIF transparency.
    pub background: Option<[u8; 4]>,
    /// Loop count written to the GIF; 0 loops forever.
    pub loop_count: u16,
}

impl FfmpegGifSinkOpts {
    /// Options writing an endlessly looping, transparent GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: None,
            loop_count: 0,
        }
    }
}

/// Spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
///
/// `ffmpeg` owns the GIF container and the palette; this sink only feeds pixels.
pub struct FfmpegGifSink {
    opts: FfmpegGifSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegGifSink {
    /// Create a sink; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegGifSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Output GIF path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    /// Stop a running encoder without finalizing the GIF.
    ///
    /// Kills and reaps `ffmpeg` and joins the stderr drain. A no-op when nothing was spawned.
    pub fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        self.cfg = None;
        self.last_idx = None;
    }
}

impl Drop for FfmpegGifSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            tracing::debug!(
                out = %self.opts.out_path.display(),
                "gif sink dropped before end; stopping ffmpeg"
            );
            self.abort();
        }
    }
}

impl FrameSink for FfmpegGifSink {
    fn begin(&mut self, cfg: SinkConfig) -> TunnelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TunnelError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.frame_delay_cs == 0 {
            return Err(TunnelError::validation("frame delay must be non-zero"));
        }

        if let Some(parent) = self.opts.out_path.parent() {
            ensure_dir(parent)?;
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(TunnelError::encoding(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(TunnelError::encoding(
                "ffmpeg is required for GIF encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &gif_frame_rate(cfg.frame_delay_cs),
            "-i",
            "pipe:0",
            "-filter_complex",
            palette_filter(self.opts.background.is_none()),
            "-loop",
            &self.opts.loop_count.to_string(),
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            TunnelError::encoding(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TunnelError::encoding("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TunnelError::encoding("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(out = %self.opts.out_path.display(), "spawned ffmpeg gif encoder");
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> TunnelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| TunnelError::encoding("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(TunnelError::encoding(
                "gif sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TunnelError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let bytes: &[u8] = match self.opts.background {
            Some(bg) => {
                flatten_straight_over_bg(&mut self.scratch, &frame.data, bg)?;
                &self.scratch
            }
            None => &frame.data,
        };

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TunnelError::encoding("gif sink is already finalized"));
        };
        use std::io::Write as _;
        stdin
            .write_all(bytes)
            .map_err(|e| TunnelError::encoding(format!("write frame to ffmpeg stdin: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> TunnelResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| TunnelError::encoding("gif sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| TunnelError::encoding(format!("wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TunnelError::encoding("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| TunnelError::encoding(format!("read ffmpeg stderr: {e}")))?,
            None => Vec::new(),
        };

        self.cfg = None;
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(TunnelError::encoding(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }
        tracing::debug!(out = %self.opts.out_path.display(), "gif written");
        Ok(())
    }
}

/// Input frame rate for a per-frame delay in centiseconds, as an ffmpeg rational.
pub(crate) fn gif_frame_rate(frame_delay_cs: u16) -> String {
    format!("100/{}", frame_delay_cs.max(1))
}

fn palette_filter(transparent: bool) -> &'static str {
    if transparent {
        concat!(
            "[0:v]split[a][b];[a]palettegen=reserve_transparent=1[p];",
            "[b][p]paletteuse=alpha_threshold=128",
        )
    } else {
        "[0:v]split[a][b];[a]palettegen[p];[b][p]paletteuse"
    }
}

/// Straight-alpha "over" onto an opaque background, written as opaque RGBA8.
pub(crate) fn flatten_straight_over_bg(
    dst: &mut [u8],
    src: &[u8],
    bg: [u8; 4],
) -> TunnelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TunnelError::encoding(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u32::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let v = u32::from(s[c]) * a + u32::from(bg[c]) * inv;
            d[c] = ((v + 127) / 255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Create `dir` and its parents.
pub fn ensure_dir(dir: &Path) -> TunnelResult<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    use anyhow::Context as _;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
