use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stage_preview::{
    CaptureInfo, DISPLAY_KEY, FixedScreen, ImageSequence, Pipeline, PngDirSurface, Preprocess,
    PreviewOptions, ResultPreviewer, RuntimeConfig, ScreenSize, bool_option, compute_preview_size,
    parse_runtime_config,
};

#[derive(Parser, Debug)]
#[command(name = "stage-preview", version)]
struct Cli {
    /// Log preview sizing and per-frame activity.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the preprocessing stage over an image sequence, writing previews as PNGs.
    Run(RunArgs),
    /// Print the preview size for a capture and target resolution as JSON.
    Size(SizeArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input directory, or one or more image files in playback order.
    #[arg(long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Directory previews are written under, one subdirectory per window.
    #[arg(long)]
    out: PathBuf,

    /// Screen resolution used when WIDTH/HEIGHT are not set.
    #[arg(long, default_value = "1920x1080")]
    screen: ScreenSize,

    /// Runtime configuration as a JSON object, e.g. '{"display": false}'.
    #[arg(long)]
    config: Option<String>,

    /// Gaussian blur sigma for the `blurred` output.
    #[arg(long, default_value_t = 2.0)]
    sigma: f32,

    /// Write previews even when DISPLAY is not set.
    #[arg(long)]
    force_display: bool,
}

#[derive(Parser, Debug)]
struct SizeArgs {
    /// Native capture resolution.
    #[arg(long)]
    capture: ScreenSize,

    /// Target (screen) resolution.
    #[arg(long)]
    target: ScreenSize,

    /// Fraction of the fitted size to use.
    #[arg(long, default_value_t = stage_preview::DEFAULT_SHRINK_FACTOR)]
    shrink: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Size(args) => cmd_size(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_capture(inputs: &[PathBuf]) -> anyhow::Result<ImageSequence> {
    let capture = match inputs {
        [single] if single.is_dir() => ImageSequence::from_dir(single)?,
        files => ImageSequence::from_paths(files.to_vec())?,
    };
    Ok(capture)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut options = PreviewOptions::from_env().context("read preview options from env")?;
    if args.force_display {
        options.headless = false;
    }

    let config = match &args.config {
        Some(json) => parse_runtime_config(json)?,
        None => RuntimeConfig::new(),
    };

    let capture = open_capture(&args.inputs)?;
    let info = CaptureInfo::of(&capture);
    let stage = Preprocess::new(capture, args.sigma)?;
    let previewer = ResultPreviewer::new(
        stage,
        options,
        PngDirSurface::new(&args.out),
        FixedScreen(args.screen),
    )?;

    let display_enabled = bool_option(&config, DISPLAY_KEY)?.unwrap_or(true);

    let mut pipeline = Pipeline::new(config);
    pipeline.set_capture_source(&info);
    pipeline.push(previewer)?;

    let frames = pipeline.run()?;
    if options.headless {
        eprintln!("processed {frames} frames (headless, no previews written)");
    } else if !display_enabled {
        eprintln!("processed {frames} frames (display disabled, no previews written)");
    } else {
        eprintln!("processed {frames} frames, previews in {}", args.out.display());
    }
    Ok(())
}

fn cmd_size(args: SizeArgs) -> anyhow::Result<()> {
    let capture = CaptureInfo {
        frame_width: args.capture.width,
        frame_height: args.capture.height,
    };
    let size = compute_preview_size(args.target, capture, args.shrink)?;
    println!("{}", serde_json::to_string(&size)?);
    Ok(())
}
