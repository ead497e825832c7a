//! Geolens - detection visualization and photo geolocation CLI tool.
//!
//! This crate turns object detections into annotated images and density
//! heatmaps, and estimates where a photo was taken from its GPS metadata.

#![warn(missing_docs)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod describe;
pub mod detection;
pub mod error;
pub mod location;
pub mod output;
pub mod pipeline;
pub mod render;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command};
use config::{Config, config_file_path, load_default_config, save_default_config, validate_config};
use location::{ConfiguredGeocoder, resolve_location};
use pipeline::{
    AnalysisSettings, Analyzer, ProcessCheck, ProcessOptions, collect_input_files, output_dir_for,
    process_file, should_process,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for geolens CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    // Load configuration, then apply command line overrides
    let mut config = load_default_config()?;
    apply_overrides(&mut config, &cli.analyze);

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &cli.analyze, &config);
    }

    // Show help if no inputs provided
    if cli.inputs.is_empty() {
        let config_exists = config_file_path().is_ok_and(|path| path.exists());
        cli::help::print_smart_help(config_exists);
        return Ok(());
    }

    check_usage(&cli.inputs, &cli.analyze)?;

    analyze_files(&cli.inputs, &cli.analyze, &config)
}

/// Fold flags that shadow config values into the config.
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(url) = &args.geocoder_url {
        config.geocoder.endpoint.clone_from(url);
    }
    if let Some(timeout) = args.timeout {
        config.geocoder.timeout_secs = timeout;
    }
    if args.write_images {
        config.output.write_images = true;
    }
}

/// Reject flag combinations clap cannot express.
fn check_usage(inputs: &[PathBuf], args: &AnalyzeArgs) -> Result<()> {
    let usage = |message: &str| -> Result<()> {
        Err(Error::Usage {
            message: message.to_string(),
        })
    };

    if args.stdout {
        if inputs.len() != 1 {
            return usage("--stdout requires exactly one input file");
        }
        if args.output_dir.is_some() {
            return usage("--stdout cannot be used with --output-dir");
        }
    }
    if args.detections.is_some() && inputs.len() != 1 {
        return usage("--detections requires exactly one input file");
    }

    Ok(())
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| Error::RuntimeStart { source })
}

/// The HTTP client is built inside the runtime it will run on.
fn build_geocoder(
    runtime: &tokio::runtime::Runtime,
    config: &Config,
    args: &AnalyzeArgs,
) -> Result<ConfiguredGeocoder> {
    let _guard = runtime.enter();
    ConfiguredGeocoder::from_config(&config.geocoder, args.offline)
}

/// Analyze input files with the given options.
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();
    validate_config(config)?;

    // Collect all input files
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImageFiles);
    }
    if args.stdout && files.len() != 1 {
        return Err(Error::Usage {
            message: "--stdout requires exactly one input file".to_string(),
        });
    }
    // A directory argument can expand to several images sharing one detections file
    if args.detections.is_some() && files.len() != 1 {
        return Err(Error::Usage {
            message: "--detections requires exactly one input file".to_string(),
        });
    }

    info!("Found {} image file(s) to process", files.len());

    let options = ProcessOptions {
        detections: args.detections.clone(),
        min_confidence: args.min_confidence.unwrap_or(0.0),
        write_images: config.output.write_images,
        to_stdout: args.stdout,
    };
    let output_dir = args.output_dir.clone();
    // A report on stdout is never "already there"
    let force = args.force || args.stdout;
    let fail_fast = args.fail_fast;

    let runtime = build_runtime()?;
    let geocoder = build_geocoder(&runtime, config, args)?;
    let analyzer = Analyzer::new(geocoder, AnalysisSettings::from(config));

    // Create file progress bar
    let progress_enabled = !args.quiet && !args.no_progress && !args.stdout;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    // Process files
    let mut processed = 0;
    let mut skipped = 0;
    let mut errors = 0;
    let mut total_detections = 0;

    for file in &files {
        let file_output_dir = output_dir_for(file, output_dir.as_deref());

        if should_process(file, &file_output_dir, force) == ProcessCheck::SkipExists {
            info!("Skipping (report exists): {}", file.display());
            skipped += 1;
            progress::inc_progress(file_progress.as_ref());
            continue;
        }

        if let Some(name) = file.file_name() {
            progress::set_current_file(file_progress.as_ref(), &name.to_string_lossy());
        }

        match runtime.block_on(process_file(file, &file_output_dir, &analyzer, &options)) {
            Ok(result) => {
                processed += 1;
                total_detections += result.detections;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    // Summary
    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} processed, {} skipped, {} errors, {} total detections in {:.2}s",
        processed, skipped, errors, total_detections, total_duration
    );

    if errors > 0 && !fail_fast {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // HTTP client internals are only interesting at -vv and above.
    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info,reqwest=warn,hyper=warn,hyper_util=warn",
            1 => "debug,reqwest=info,hyper=info,hyper_util=info",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr so reports written to stdout stay parseable.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Locate { image } => handle_locate_command(&image, args, config),
    }
}

#[allow(clippy::print_stdout)]
fn handle_locate_command(image: &Path, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    let bytes = std::fs::read(image).map_err(|source| Error::ImageRead {
        path: image.to_path_buf(),
        source,
    })?;

    validate_config(config)?;
    let runtime = build_runtime()?;
    let geocoder = build_geocoder(&runtime, config, args)?;
    let location = runtime.block_on(resolve_location(&bytes, &geocoder));

    let json = serde_json::to_string_pretty(&location)
        .map_err(|source| Error::ReportSerialize { source })?;
    println!("{json}");
    if let Some(url) = location.maps_url(config.output.maps_zoom) {
        println!("{url}");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|source| Error::ConfigSerialize { source })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
