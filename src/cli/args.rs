//! CLI argument definitions.

use crate::cli::validators::{parse_confidence, parse_timeout};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Annotate object detections, render density heatmaps and estimate where a photo was taken.
#[derive(Debug, Parser)]
#[command(name = "geolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input images or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the location of a single image.
    Locate {
        /// Image to read GPS metadata from.
        image: PathBuf,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Detection file to use (default: `<stem>.detections.json|csv` next to the image).
    #[arg(long, env = "GEOLENS_DETECTIONS")]
    pub detections: Option<PathBuf>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "GEOLENS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Minimum detection confidence (0.0-1.0).
    #[arg(short = 'c', long, value_parser = parse_confidence, env = "GEOLENS_MIN_CONFIDENCE")]
    pub min_confidence: Option<f32>,

    /// Do not contact the geocoding service.
    #[arg(long, global = true, env = "GEOLENS_OFFLINE")]
    pub offline: bool,

    /// Reverse geocoding endpoint (overrides config).
    #[arg(long, global = true, env = "GEOLENS_GEOCODER_URL")]
    pub geocoder_url: Option<String>,

    /// Geocoding timeout in seconds (overrides config).
    #[arg(long, global = true, value_parser = parse_timeout, env = "GEOLENS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Reprocess images even if a report exists.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Write the report to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,

    /// Also write the annotated and heatmap images as JPEG files.
    #[arg(long)]
    pub write_images: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
