//! This is the module handling the `open` sub-command.
//!

use eyre::Result;
use tracing::trace;

use fcbox_engine::{Session, Status};

use crate::{resolve_dump, OpenOpts};

/// Load a dump directory and report what is inside.
///
#[tracing::instrument(skip(session))]
pub fn open_log(session: &mut Session, opts: &OpenOpts) -> Result<()> {
    trace!("enter");

    let dump = resolve_dump(session, &opts.dump)?;
    let report = session.open(&dump)?;

    println!("Log dump {}:", dump.display());
    for (name, count) in &report.streams {
        println!("  {}: {} messages", name, count);
    }

    match report.source {
        Some(src) => println!("Using {} messages for position info.", src),
        None => println!("{}", Status::NoPositionSource),
    }
    if let Some(origin) = report.origin {
        println!("Origin at {}s:", origin.timestamp);
        println!("  {}", origin);
    }

    // A box held from a previous extraction survives the load.
    //
    if session.zone().valid() {
        println!("{}", session.zone());
    }

    Ok(())
}
