//! Module describing all possible commands and sub-commands to the `fcboxctl` main driver.
//!
//! The log-opening commands (`open`, `extract`, `accuracy`, `rates`) all take
//! the dump directory as an optional argument; without one they fall back to
//! the location remembered in the configuration, like the previous run's dump.
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Hierarchical span tree in the logs.
    #[clap(long)]
    pub tree: bool,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `accuracy [DIR]`
/// `completion SHELL`
/// `config`
/// `extract [-n CHANNEL] [-o FILE] [DIR]`
/// `open [DIR]`
/// `rates [DIR]`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// GPS accuracy over the whole log
    Accuracy(OpenOpts),
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Show the current configuration
    Config,
    /// Extract the flight box and optionally write it out
    Extract(ExtractOpts),
    /// Open a log dump and report what is inside
    Open(OpenOpts),
    /// Message counts and rates per stream
    Rates(OpenOpts),
    /// Display utility full version
    Version,
}

// ------

/// Options for the commands that just need a log.
///
#[derive(Debug, Parser)]
pub struct OpenOpts {
    /// Log dump directory.
    pub dump: Option<PathBuf>,
}

// ------

/// Options for the box extraction itself.
///
#[derive(Debug, Parser)]
pub struct ExtractOpts {
    /// RC channel carrying the switch, 0 disables it (overrides the configuration).
    #[clap(short = 'n', long)]
    pub channel: Option<u8>,
    /// Write the box to this file.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Log dump directory.
    pub dump: Option<PathBuf>,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}
