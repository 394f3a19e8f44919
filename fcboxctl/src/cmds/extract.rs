//! This is the module handling the `extract` sub-command.
//!

use eyre::{eyre, Result};
use tracing::trace;

use fcbox_engine::{Outcome, Session};

use crate::{resolve_dump, ExtractOpts};

/// Run the full extraction and narrate what the detectors found.
///
#[tracing::instrument(skip(session))]
pub fn extract_box(session: &mut Session, opts: &ExtractOpts) -> Result<()> {
    trace!("enter");

    let dump = resolve_dump(session, &opts.dump)?;
    session.open(&dump)?;

    if let Some(src) = session.source() {
        println!("Using {} messages for position info.", src);
    }

    let ext = session.extract(opts.channel)?;

    if let Some(switch) = &ext.switch {
        match switch {
            Ok(n) => println!("Found {} switch transitions of channel C{}", n, ext.channel),
            Err(e) => println!("{}", e),
        }
    }
    for p in &ext.periods {
        println!(
            "Stationary between {:.1}s and {:.1}s, will measure at {:.2}s",
            p.start, p.end, p.measure_time
        );
    }

    if ext.outcome == Outcome::NotEnoughCandidates {
        return Err(eyre!(
            "Failed to find at least two times to provide box locations."
        ));
    }

    if let Some(origin) = session.origin() {
        for t in &ext.clustering.skipped {
            println!(
                "Skipping time {:.1}s as it occurs before the origin time ({:.1}s).",
                t, origin.timestamp
            );
        }
    }
    for c in &ext.clustering.candidates {
        println!();
        println!(
            "Position at time {:.2}s, {:.1}m from origin:",
            c.time, c.dist_to_origin
        );
        println!("  {}", c.pos);
    }

    if let Outcome::Unclear(n) = ext.outcome {
        return Err(eyre!("Box position is unclear, {} spots instead of 2.", n));
    }

    println!();
    println!("Box extracted:");
    println!("{}", session.zone());

    if let Some(output) = &opts.output {
        session.save(output)?;
        println!("Box written to {}", output.display());
    }

    Ok(())
}
