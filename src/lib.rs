//! spcand - single-pulse candidate extraction.
//!
//! This crate recovers ranked candidates from single-pulse group reports
//! and builds DM-vs-time detection arrays from per-DM detection logs,
//! either loose on disk or packed in a gzipped tarball.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod numeric;
pub mod output;
pub mod report;
pub mod singlepulse;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, DmvtArgs, GroupsArgs};
use config::{Config, OutputFormat, config_file_path, load_default_config, save_default_config};
use singlepulse::{LooseFiles, Tarball, dm_vs_time};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for spcand CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet);

    // Load configuration
    let config = load_default_config()?;
    let format = cli.global.format.unwrap_or(config.defaults.format);

    match cli.command {
        Command::Groups(args) => run_groups(&args, &config, format),
        Command::Dmvt(args) => run_dm_vs_time(&args, &config, format),
        Command::Config { action } => handle_config_command(action),
    }
}

/// Resolve every group of the requested rank and print its parameters.
fn run_groups(args: &GroupsArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let rank = args
        .rank
        .or(config.defaults.rank)
        .ok_or_else(|| Error::ConfigValidation {
            message: "no rank specified (use --rank or set defaults.rank in config)".to_string(),
        })?;

    let candidates = report::candidates_for_rank(&args.report, rank)?;
    if candidates.is_empty() {
        warn!(
            "No groups of rank {rank} found in {}",
            args.report.display()
        );
    }

    let mut stdout = std::io::stdout().lock();
    output::write_candidates(&mut stdout, format, &args.report, rank, &candidates)
}

/// Collect DM-vs-time arrays from a tarball or loose detection logs.
fn run_dm_vs_time(args: &DmvtArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut arrays = if let Some(tarball_path) = &args.tarball {
        let tarball = Tarball::open(tarball_path)?;
        let names = args
            .names
            .clone()
            .unwrap_or_else(|| tarball.singlepulse_names());
        info!(
            "Selecting from {} detection log(s) in {}",
            names.len(),
            tarball_path.display()
        );
        dm_vs_time(&args.dm, &names, &tarball)?
    } else {
        info!("Selecting from {} loose detection log(s)", args.files.len());
        dm_vs_time(&args.dm, &args.files, &LooseFiles::new())?
    };

    if let Some(threshold) = args.min_sigma.or(config.defaults.min_sigma) {
        let before = arrays.len();
        arrays.retain_min_sigma(threshold);
        info!(
            "Kept {} of {before} detection(s) with sigma >= {threshold}",
            arrays.len()
        );
    }

    let mut stdout = std::io::stdout().lock();
    output::write_dm_vs_time(&mut stdout, format, &arrays)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr so results on stdout stay machine-readable.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
