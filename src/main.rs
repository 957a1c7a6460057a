//! `lod-tiler` CLI - Slice a square texture into LOD tiles.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lod_tiler::image::{OutputFormat, ResizeFilter};
use lod_tiler::pipeline::ResizeMode;
use lod_tiler::{Config, Session, Splitter};

/// Slice a square texture into an NxN grid of tiles with three LOD levels each.
#[derive(Parser, Debug)]
#[command(name = "lod-tiler")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source texture.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory the parent folder is created in. Defaults to the directory of INPUT.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Tiles per row and per column.
    #[arg(short = 'n', long = "tiles", default_value = "4", value_name = "INT")]
    tiles_per_axis: u32,

    /// Top-level output folder name.
    #[arg(long = "parent", default_value = "Ground48", value_name = "NAME")]
    parent_folder: String,

    /// Folder inside each tile folder that holds the LOD files.
    #[arg(long = "variant", default_value = "AO", value_name = "NAME")]
    variant_folder: String,

    /// Output format (PNG, JPEG, BMP, TARGA, TIFF).
    #[arg(short, long, default_value = "JPEG", value_name = "FORMAT")]
    format: OutputFormat,

    /// Side length of the LOD_01 tier in pixels.
    #[arg(long, default_value = "512", value_name = "PX")]
    lod01_size: u32,

    /// Side length of the LOD_00 tier in pixels.
    #[arg(long, default_value = "64", value_name = "PX")]
    lod00_size: u32,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "95", value_name = "INT")]
    quality: u8,

    /// Resampling filter (nearest, triangle, catmull-rom, gaussian, lanczos3).
    #[arg(long, default_value = "lanczos3", value_name = "FILTER")]
    filter: ResizeFilter,

    /// Derive each LOD from the previous one instead of from the native tile.
    #[arg(long)]
    cascade: bool,

    /// Hide the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("lod_tiler={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let root = args
        .root
        .clone()
        .unwrap_or_else(|| default_root(&args.input));

    let mut session = Session::with_root(root);
    let image_name = session
        .load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let config = Config {
        image_name,
        tiles_per_axis: args.tiles_per_axis,
        parent_folder: args.parent_folder.clone(),
        variant_folder: args.variant_folder.clone(),
        output_format: args.format,
        lod01_size: args.lod01_size,
        lod00_size: args.lod00_size,
        output_quality: args.quality,
        filter: args.filter,
        resize_mode: if args.cascade {
            ResizeMode::Cascade
        } else {
            ResizeMode::Independent
        },
        show_progress: !args.no_progress,
    };

    let splitter = Splitter::new(config).context("Invalid configuration")?;
    let report = splitter
        .split(&session)
        .context("Failed to split image")?;

    println!(
        "Wrote {} tiles ({} files) to {}",
        report.tiles.len(),
        report.file_count(),
        report.parent_dir.display()
    );

    Ok(())
}

/// Directory holding `input`, or the working directory for a bare file name.
fn default_root(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
