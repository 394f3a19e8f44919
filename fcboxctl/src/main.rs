//! Utility to recover the F3A flight box out of an ArduPilot log dump.
//!

use std::io;
use std::path::Path;

use clap::{crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::trace;

use fcbox_common::{init_logging, Config};
use fcbox_engine::Session;
use fcboxctl::{
    extract_box, open_log, show_accuracy, show_config, show_rates, Opts, SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Shell completion needs neither logging nor a configuration.
    //
    if let SubCommand::Completion(copts) = &opts.subcmd {
        generate(copts.shell, &mut Opts::command(), NAME, &mut io::stdout());
        return Ok(());
    }

    // Initialise logging early
    //
    init_logging(opts.verbose, opts.tree)?;
    trace!("Logging initialised.");

    let cfg = Config::load(opts.config.as_deref())?;

    // Banner
    //
    banner()?;

    let mut session = Session::new(cfg);

    let touched = handle_subcmd(&mut session, &opts.subcmd, opts.config.as_deref())?;

    // The log-opening commands remember their dump and channel for next time.
    //
    if touched {
        session.config().save(opts.config.as_deref())?;
    }

    Ok(())
}

/// Returns whether the configuration should be written back.
///
pub fn handle_subcmd(
    session: &mut Session,
    subcmd: &SubCommand,
    cfgname: Option<&Path>,
) -> Result<bool> {
    match subcmd {
        // Handle `open dir`
        //
        SubCommand::Open(oopts) => {
            trace!("open");

            open_log(session, oopts)?;
            Ok(true)
        }

        // Handle `extract [-n channel] [-o file] dir`
        //
        SubCommand::Extract(eopts) => {
            trace!("extract");

            extract_box(session, eopts)?;
            Ok(true)
        }

        // Handle `accuracy dir`
        //
        SubCommand::Accuracy(oopts) => {
            trace!("accuracy");

            show_accuracy(session, oopts)?;
            Ok(true)
        }

        // Handle `rates dir`
        //
        SubCommand::Rates(oopts) => {
            trace!("rates");

            show_rates(session, oopts)?;
            Ok(true)
        }

        // Standalone `config` command
        //
        SubCommand::Config => {
            trace!("config");

            show_config(session, cfgname)?;
            Ok(false)
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("{}", version());
            eprintln!("Modules: ");
            eprintln!("\t{}", fcbox_common::version());
            eprintln!("\t{}", fcbox_formats::version());
            eprintln!("\t{}", fcbox_engine::version());
            Ok(false)
        }

        // Handled before anything else in `main()`
        //
        SubCommand::Completion(_) => Ok(false),
    }
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{}
{}
"##,
        NAME,
        VERSION,
        crate_description!()
    ))
}
