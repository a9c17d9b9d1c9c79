use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wavefill", version)]
struct Cli {
    /// Raise the log level (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a progress ramp as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Render a progress ramp as an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Side length of the square view in pixels.
    #[arg(long)]
    size: u32,

    /// Indicator config JSON. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file for the progress label.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RampArgs {
    /// Progress at the first frame.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    from: i32,

    /// Progress at the last frame.
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    to: i32,

    /// Length of the ramp in milliseconds.
    #[arg(long, default_value_t = 2000)]
    duration_ms: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Progress to show; overrides the config value.
    #[arg(long, allow_negative_numbers = true)]
    progress: Option<i32>,

    /// Animation ticks to run before capturing.
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    view: ViewArgs,

    #[command(flatten)]
    ramp: RampArgs,

    /// Output directory for `frame_<index>.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    view: ViewArgs,

    #[command(flatten)]
    ramp: RampArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<wavefill::IndicatorConfig> {
    match path {
        Some(p) => wavefill::IndicatorConfig::load_json(p)
            .with_context(|| format!("load indicator config '{}'", p.display())),
        None => Ok(wavefill::IndicatorConfig::default()),
    }
}

fn render_settings(font: Option<&Path>) -> anyhow::Result<wavefill::RenderSettings> {
    let settings = wavefill::RenderSettings::default();
    match font {
        Some(p) => Ok(settings.with_font_file(p)?),
        None => Ok(settings),
    }
}

fn open_playback(view: &ViewArgs) -> anyhow::Result<wavefill::Playback> {
    let config = read_config(view.config.as_deref())?;
    let settings = render_settings(view.font.as_deref())?;
    Ok(wavefill::Playback::new(
        config,
        wavefill::ViewSize::square(view.size),
        settings,
    )?)
}

fn range_opts(ramp: &RampArgs) -> wavefill::RangeOpts {
    wavefill::RangeOpts {
        from: ramp.from,
        to: ramp.to,
        duration: Duration::from_millis(ramp.duration_ms),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.view.config.as_deref())?;
    let progress = args.progress.unwrap_or(config.progress);
    let settings = render_settings(args.view.font.as_deref())?;

    let frame = wavefill::render_still(
        config,
        wavefill::ViewSize::square(args.view.size),
        progress,
        args.ticks,
        settings,
    )?;
    wavefill::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut playback = open_playback(&args.view)?;
    let mut sink = wavefill::PngSequenceSink::new(&args.out_dir, "frame");
    let stats = playback.render_range(range_opts(&args.ramp), &mut sink)?;

    eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !wavefill::is_ffmpeg_on_path() {
        anyhow::bail!("`ffmpeg` was not found on PATH");
    }
    let mut playback = open_playback(&args.view)?;
    let mut sink = wavefill::FfmpegSink::new(wavefill::FfmpegSinkOpts::new(&args.out));
    let stats = playback.render_range(range_opts(&args.ramp), &mut sink)?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames);
    Ok(())
}
