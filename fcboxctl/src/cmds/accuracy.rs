//! This is the module handling the `accuracy` sub-command.
//!

use eyre::Result;
use tracing::trace;

use fcbox_engine::{gps_accuracy, Session};

use crate::{resolve_dump, OpenOpts};

/// GPS solution quality over the whole log.
///
#[tracing::instrument(skip(session))]
pub fn show_accuracy(session: &mut Session, opts: &OpenOpts) -> Result<()> {
    trace!("enter");

    let dump = resolve_dump(session, &opts.dump)?;
    session.open(&dump)?;

    let acc = gps_accuracy(session.log()?)?;
    println!("{}", acc);

    Ok(())
}
