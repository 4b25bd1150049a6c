//! rekey - chroma-key background removal and format conversion CLI

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rekey_core::{BackgroundMode, Rgb8, Rgba8};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod preset;

#[derive(Parser)]
#[command(name = "rekey")]
#[command(author, version, about = "Chroma-key background removal and format conversion")]
#[command(long_about = "
Resize, crop, key out a background color, limit alpha, composite over a new
background and save as PNG, JPEG, WebP, TIFF or BMP.

Examples:
  rekey info logo.png
  rekey process logo.png -o out/logo -b white -t 12
  rekey process shot.jpg -o shot --key-color 00ff00 -t 25 -f webp -q 80
  rekey process scan.png -o scan --resize 800x600 --crop 10,10,790,590
  rekey process in.png -o out --preset transparent-logo.yaml --invert
  rekey -vv --log-file rekey.log process in.png -o out -f bmp
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Colored log output
    #[arg(long, global = true)]
    color: bool,

    /// Also write logs to this file (rotated daily)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the processing pipeline on an image and save the result
    #[command(visible_alias = "p")]
    Process(ProcessArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

/// Arguments for the `process` command.
///
/// Every option overrides the matching value of `--preset`.
#[derive(Args, Default)]
struct ProcessArgs {
    /// Input image
    input: PathBuf,

    /// Output path (extension is replaced to match the format)
    #[arg(short, long)]
    output: PathBuf,

    /// YAML preset with `process` and `save` sections
    #[arg(long, value_name = "FILE")]
    preset: Option<PathBuf>,

    /// Write the effective options as a YAML preset
    #[arg(long, value_name = "FILE")]
    save_preset: Option<PathBuf>,

    /// Output format: png, jpg, webp, tiff, bmp (unknown names fall back to png)
    #[arg(short, long)]
    format: Option<String>,

    /// Quality 0-100 (JPEG, WebP)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: Option<u8>,

    /// Favor encode speed over file size
    #[arg(long)]
    no_optimize: bool,

    /// Keep metadata where the format allows
    #[arg(long)]
    preserve_metadata: bool,

    /// Resize to WIDTHxHEIGHT before anything else
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    resize: Option<(u32, u32)>,

    /// Crop edges LEFT,TOP,RIGHT,BOTTOM (right/bottom exclusive), applied after resize
    #[arg(long, value_name = "L,T,R,B", value_parser = parse_edges)]
    crop: Option<(u32, u32, u32, u32)>,

    /// Background to key out: none, black, white, custom
    #[arg(short, long)]
    background: Option<BackgroundMode>,

    /// Key color as RRGGBB (implies --background custom)
    #[arg(long, value_name = "HEX")]
    key_color: Option<Rgb8>,

    /// Key tolerance: 0-100 for custom, 0-255 for black/white
    #[arg(short, long)]
    tolerance: Option<u8>,

    /// Invert colors of pixels that are kept
    #[arg(long)]
    invert: bool,

    /// Clamp alpha of visible pixels to this value
    #[arg(long, value_name = "0-255")]
    alpha: Option<u8>,

    /// Composite the result over this color (RRGGBB or RRGGBBAA)
    #[arg(long, value_name = "HEX")]
    replace_background: Option<Rgba8>,

    /// Also write a 300x300-bounded PNG preview of the result
    #[arg(long, value_name = "PATH")]
    preview: Option<PathBuf>,
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Parses `WIDTHxHEIGHT`.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

/// Parses `LEFT,TOP,RIGHT,BOTTOM`.
fn parse_edges(s: &str) -> Result<(u32, u32, u32, u32), String> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("bad crop edges '{s}': {e}"))?;
    match parts[..] {
        [l, t, r, b] => Ok((l, t, r, b)),
        _ => Err(format!("expected LEFT,TOP,RIGHT,BOTTOM, got '{s}'")),
    }
}

/// Installs the console subscriber and, with `--log-file`, a daily-rolling
/// file layer. The returned guard flushes the file writer on drop.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cli.color)
        .with_target(cli.verbose > 1);

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .with_context(|| format!("--log-file needs a file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    match cli.command {
        Commands::Process(args) => commands::process::run(args, cli.verbose > 0),
        Commands::Info(args) => commands::info::run(args, cli.verbose > 0),
    }
}
