use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use rayon::prelude::*;

use crate::assets::source::SourceImage;
use crate::config::params::ParameterSet;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::{TunnelError, TunnelResult};
use crate::render::frame::FrameSynthesizer;

/// Cooperative cancellation flag shared between a controller and a running driver.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The driver stops at the next frame boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// `true` once [`CancelToken::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Terminal {
    /// Every frame was delivered.
    Completed,
    /// Stopped at a frame boundary on request.
    Cancelled,
    /// Aborted with the given reason.
    Failed(String),
}

/// Message sent to a [`ProgressSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// One frame was delivered.
    Frame {
        /// Completion in `0..=100`.
        percent: u8,
        /// Human readable status, `"Frame i/N"`.
        message: String,
    },
    /// The run reached a terminal state. Always the last event.
    Finished(Terminal),
}

/// Receiver of progress events. Reporting never blocks the render loop.
pub trait ProgressSink {
    /// Deliver one event.
    fn report(&self, event: ProgressEvent);
}

impl ProgressSink for mpsc::Sender<ProgressEvent> {
    fn report(&self, event: ProgressEvent) {
        // A dropped receiver only means nobody is listening anymore.
        let _ = self.send(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Successful end of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// All frames were delivered.
    Completed {
        /// Frames delivered.
        frames: u64,
    },
    /// Cancellation was observed at a frame boundary.
    Cancelled {
        /// Frames delivered before stopping.
        frames: u64,
    },
}

impl RunOutcome {
    /// Frames delivered to the sink.
    pub fn frames(&self) -> u64 {
        match *self {
            RunOutcome::Completed { frames } | RunOutcome::Cancelled { frames } => frames,
        }
    }
}

/// Lifecycle of an [`AnimationDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Not started.
    Idle,
    /// Validating parameters and decoding the source image.
    Loading,
    /// Producing frames.
    Running,
    /// Finished with every frame delivered.
    Completed,
    /// Stopped on request.
    Cancelled,
    /// Aborted by an error.
    Failed,
}

/// Options controlling frame scheduling.
#[derive(Clone, Debug)]
pub struct DriverOpts {
    /// Synthesize frames of a chunk on a rayon pool.
    pub parallel: bool,
    /// Frames synthesized per parallel chunk.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for DriverOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Drives one animation run from a private copy of the parameters.
///
/// Frames reach the sink in strictly increasing index order in both scheduling modes.
#[derive(Debug)]
pub struct AnimationDriver {
    params: ParameterSet,
    opts: DriverOpts,
    state: DriverState,
}

impl AnimationDriver {
    /// Sequential driver over `params`.
    pub fn new(params: ParameterSet) -> Self {
        Self::with_opts(params, DriverOpts::default())
    }

    /// Driver with explicit scheduling options.
    pub fn with_opts(params: ParameterSet, opts: DriverOpts) -> Self {
        Self {
            params,
            opts,
            state: DriverState::Idle,
        }
    }

    /// Parameters this driver runs with.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Load the source image named by the parameters, then run.
    ///
    /// Loading errors return before `sink.begin` is called.
    #[tracing::instrument(level = "debug", skip_all, fields(frames = self.params.frame_count))]
    pub fn run(
        &mut self,
        sink: &mut dyn FrameSink,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> TunnelResult<RunOutcome> {
        self.transition(DriverState::Loading);
        let loaded = self.params.validate().and_then(|()| {
            SourceImage::load(&self.params.source_image_path, self.params.working_size)
        });
        let source = match loaded {
            Ok(source) => source,
            Err(e) => return Err(self.fail(progress, e)),
        };
        self.run_frames(&source, sink, progress, cancel)
    }

    /// Run with an already decoded source image.
    #[tracing::instrument(level = "debug", skip_all, fields(frames = self.params.frame_count))]
    pub fn run_with_source(
        &mut self,
        source: &SourceImage,
        sink: &mut dyn FrameSink,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> TunnelResult<RunOutcome> {
        self.transition(DriverState::Loading);
        if let Err(e) = self.params.validate() {
            return Err(self.fail(progress, e));
        }
        self.run_frames(source, sink, progress, cancel)
    }

    fn run_frames(
        &mut self,
        source: &SourceImage,
        sink: &mut dyn FrameSink,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> TunnelResult<RunOutcome> {
        let pool = if self.opts.parallel {
            match build_thread_pool(self.opts.threads) {
                Ok(pool) => Some(pool),
                Err(e) => return Err(self.fail(progress, e)),
            }
        } else {
            None
        };

        let canvas = source.canvas();
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            frame_delay_cs: self.params.frame_delay_cs,
        };
        if let Err(e) = sink.begin(cfg) {
            return Err(self.fail(progress, e));
        }
        self.transition(DriverState::Running);

        let synth = FrameSynthesizer::new(&self.params);
        let mut delivery = Delivery {
            sink,
            progress,
            cancel,
            total: u64::from(self.params.frame_count),
            delivered: 0,
        };
        let produced = match pool.as_ref() {
            Some(pool) => delivery.parallel(&synth, source, pool, self.opts.chunk_size),
            None => delivery.sequential(&synth, source),
        };
        let finished = produced.and_then(|cancelled| {
            delivery.sink.end()?;
            Ok(cancelled)
        });
        let delivered = delivery.delivered;

        let outcome = match finished {
            Ok(true) => RunOutcome::Cancelled { frames: delivered },
            Ok(false) => RunOutcome::Completed { frames: delivered },
            Err(e) => return Err(self.fail(progress, e)),
        };

        let (state, terminal) = match outcome {
            RunOutcome::Completed { .. } => (DriverState::Completed, Terminal::Completed),
            RunOutcome::Cancelled { .. } => (DriverState::Cancelled, Terminal::Cancelled),
        };
        self.transition(state);
        tracing::info!(frames = delivered, ?state, "run finished");
        progress.report(ProgressEvent::Finished(terminal));
        Ok(outcome)
    }

    fn transition(&mut self, next: DriverState) {
        tracing::debug!(from = ?self.state, to = ?next, "driver state");
        self.state = next;
    }

    fn fail(&mut self, progress: &dyn ProgressSink, err: TunnelError) -> TunnelError {
        self.transition(DriverState::Failed);
        tracing::warn!(error = %err, "run failed");
        progress.report(ProgressEvent::Finished(Terminal::Failed(err.to_string())));
        err
    }
}

struct Delivery<'a> {
    sink: &'a mut dyn FrameSink,
    progress: &'a dyn ProgressSink,
    cancel: &'a CancelToken,
    total: u64,
    delivered: u64,
}

impl Delivery<'_> {
    /// Returns `Ok(true)` when cancellation stopped the loop.
    fn sequential(&mut self, synth: &FrameSynthesizer, source: &SourceImage) -> TunnelResult<bool> {
        for f in 0..self.total {
            if self.cancel.is_cancelled() {
                return Ok(true);
            }
            let frame = synth.synthesize(source, FrameIndex(f))?;
            self.deliver(FrameIndex(f), &frame)?;
        }
        Ok(false)
    }

    fn parallel(
        &mut self,
        synth: &FrameSynthesizer,
        source: &SourceImage,
        pool: &rayon::ThreadPool,
        chunk_size: usize,
    ) -> TunnelResult<bool> {
        let chunk = (chunk_size.max(1) as u64).min(self.total.max(1));
        let mut start = 0u64;
        while start < self.total {
            if self.cancel.is_cancelled() {
                return Ok(true);
            }
            let end = (start + chunk).min(self.total);
            let frames: Vec<TunnelResult<Raster>> = pool.install(|| {
                (start..end)
                    .into_par_iter()
                    .map(|f| synth.synthesize(source, FrameIndex(f)))
                    .collect()
            });
            tracing::trace!(start, end, "chunk synthesized");

            for (f, frame) in (start..end).zip(frames) {
                if self.cancel.is_cancelled() {
                    return Ok(true);
                }
                self.deliver(FrameIndex(f), &frame?)?;
            }
            start = end;
        }
        Ok(false)
    }

    fn deliver(&mut self, idx: FrameIndex, frame: &Raster) -> TunnelResult<()> {
        self.sink.push_frame(idx, frame)?;
        self.delivered += 1;
        let done = idx.0 + 1;
        self.progress.report(ProgressEvent::Frame {
            percent: percent_done(done, self.total),
            message: format!("Frame {done}/{}", self.total),
        });
        tracing::debug!(frame = idx.0, "frame delivered");
        Ok(())
    }
}

/// `done * 100 / total`, clamped to 100.
pub(crate) fn percent_done(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.saturating_mul(100) / total).min(100) as u8
}

fn build_thread_pool(threads: Option<usize>) -> TunnelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TunnelError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TunnelError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
