use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use psytunnel::{
    AnimationDriver, CancelToken, DriverOpts, FfmpegGifSink, FfmpegGifSinkOpts, FrameIndex,
    FrameSink, FrameSynthesizer, ParameterSet, PngSequenceSink, ProgressEvent, RunOutcome,
    SourceImage, Terminal,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "psytunnel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full loop as a GIF (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print a parameter JSON document.
    Params(ParamsArgs),
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Preset {
    #[default]
    Default,
    Advanced,
}

#[derive(Parser, Debug)]
struct ParamSource {
    /// Parameter JSON file. Flags below override its values.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Built-in preset used when no parameter file is given.
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// Randomize the effect parameters with this seed.
    #[arg(long)]
    randomize: Option<u64>,
}

#[derive(Parser, Debug)]
struct ParamArgs {
    #[command(flatten)]
    source: ParamSource,

    /// Source image path.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Number of frames in the loop.
    #[arg(long)]
    frames: Option<u32>,

    /// Starfield seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Output GIF path. Its file stem also names PNG sequence frames.
    #[arg(long)]
    out: PathBuf,

    /// Write a PNG sequence into this directory instead of invoking ffmpeg.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Flatten frames over black instead of keeping GIF transparency.
    #[arg(long, default_value_t = false)]
    opaque: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    #[command(flatten)]
    source: ParamSource,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Params(args) => cmd_params(args),
    }
}

fn base_params(src: &ParamSource) -> anyhow::Result<ParameterSet> {
    let params = match &src.params {
        Some(path) => ParameterSet::from_path(path)?,
        None => match src.preset {
            Preset::Default => ParameterSet::default(),
            Preset::Advanced => ParameterSet::advanced_preset(),
        },
    };
    Ok(match src.randomize {
        Some(seed) => params.randomized(seed),
        None => params,
    })
}

fn resolve_params(args: &ParamArgs) -> anyhow::Result<ParameterSet> {
    let mut params = base_params(&args.source)?;
    if let Some(image) = &args.image {
        params.source_image_path = image.clone();
    }
    if let Some(frames) = args.frames {
        params.frame_count = frames;
    }
    if let Some(seed) = args.seed {
        params.star_seed = seed;
    }
    params.validate()?;
    Ok(params)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;

    let mut sink: Box<dyn FrameSink> = match &args.png_dir {
        Some(dir) => {
            let stem = args
                .out
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "frame".to_owned());
            Box::new(PngSequenceSink::new(dir, stem))
        }
        None => {
            let mut opts = FfmpegGifSinkOpts::new(&args.out);
            if args.opaque {
                opts.background = Some([0, 0, 0, 255]);
            }
            Box::new(FfmpegGifSink::new(opts))
        }
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("install Ctrl-C handler")?;
    }

    let opts = DriverOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let (tx, rx) = mpsc::channel::<ProgressEvent>();
    let worker = std::thread::spawn(move || {
        let mut driver = AnimationDriver::with_opts(params, opts);
        driver.run(sink.as_mut(), &tx, &cancel)
    });

    for event in rx {
        match event {
            ProgressEvent::Frame { percent, message } => eprintln!("[{percent:>3}%] {message}"),
            ProgressEvent::Finished(Terminal::Failed(reason)) => eprintln!("failed: {reason}"),
            ProgressEvent::Finished(terminal) => tracing::debug!(?terminal, "render finished"),
        }
    }

    let outcome = worker
        .join()
        .map_err(|_| anyhow::anyhow!("render worker panicked"))??;
    let target = args.png_dir.as_ref().unwrap_or(&args.out);
    match outcome {
        RunOutcome::Completed { frames } => {
            eprintln!("wrote {} ({frames} frames)", target.display());
        }
        RunOutcome::Cancelled { frames } => {
            eprintln!("cancelled after {frames} frames; partial output at {}", target.display());
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    let source = SourceImage::load(&params.source_image_path, params.working_size)?;
    let frame = FrameSynthesizer::new(&params).synthesize(&source, FrameIndex(args.index))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> anyhow::Result<()> {
    let params = base_params(&args.source)?;
    println!("{}", params.to_json()?);
    Ok(())
}
