//! CLI argument definitions.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::validators::{parse_dm, parse_min_sigma};

/// Extract ranked single-pulse candidates and DM-vs-time detection arrays.
#[derive(Debug, Parser)]
#[command(name = "spcand")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Result format.
    #[arg(short, long, value_enum, global = true, env = "SPCAND_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the peak parameters of every group with a given rank.
    Groups(GroupsArgs),
    /// Collect DM-vs-time detections around a candidate's DM range.
    Dmvt(DmvtArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
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

/// Arguments for the groups command.
#[derive(Debug, Args)]
pub struct GroupsArgs {
    /// Group report written by the single-pulse grouping stage.
    pub report: PathBuf,

    /// Rank of the groups to extract (default: `defaults.rank` from config).
    #[arg(short, long, env = "SPCAND_RANK")]
    pub rank: Option<u32>,
}

/// Arguments for the dmvt command.
#[derive(Debug, Args)]
pub struct DmvtArgs {
    /// DM values of the candidate (comma-separated).
    #[arg(
        long = "dm",
        required = true,
        value_delimiter = ',',
        allow_hyphen_values = true,
        value_parser = parse_dm
    )]
    pub dm: Vec<f64>,

    /// Gzipped tarball of detection logs (`*.singlepulse.tgz`).
    #[arg(short, long, conflicts_with = "files")]
    pub tarball: Option<PathBuf>,

    /// Detection-log names to choose from inside the tarball
    /// (comma-separated; default: every `.singlepulse` member in archive order).
    #[arg(long, value_delimiter = ',', requires = "tarball")]
    pub names: Option<Vec<String>>,

    /// Drop detections below this significance.
    #[arg(long, value_parser = parse_min_sigma, env = "SPCAND_MIN_SIGMA")]
    pub min_sigma: Option<f64>,

    /// Loose detection logs (`*_DM<value>.singlepulse`), in DM order.
    #[arg(required_unless_present = "tarball")]
    pub files: Vec<String>,
}
