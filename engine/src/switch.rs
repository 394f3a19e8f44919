//! RC transmitter switch detection.
//!
//! Pilots flag the two reference spots by flicking a spare transmitter switch
//! while the aircraft sits on each one.  The switch shows up in the log as an
//! `RCIN` channel whose pulse width jumps across the 1500 µs midpoint.
//!

use tracing::{debug, trace};

use fcbox_formats::FlightLog;

use crate::Status;

/// Pulse width separating the two switch positions, in microseconds.
pub const RC_SWITCH_THRESHOLD: f64 = 1500.;

/// Stream carrying the RC inputs.
const RCIN: &str = "RCIN";

/// Find every crossing of the 1500 µs threshold on channel `C<channel>`.
///
/// Both directions count and there is no debounce, a rapid flick yields one
/// time per crossing.  Each crossing is reported at the earlier sample's
/// timestamp.
///
#[tracing::instrument(skip(log))]
pub fn find_rc_switch_times(log: &FlightLog, channel: u8) -> Result<Vec<f64>, Status> {
    trace!("enter");

    let col = format!("C{}", channel);
    let rcin = log
        .stream(RCIN)
        .ok_or_else(|| Status::MissingRcChannel(col.clone()))?;
    let ppm = rcin
        .column(&col)
        .ok_or_else(|| Status::MissingRcChannel(col.clone()))?;
    let stamps = rcin.timestamps();

    let mut times = vec![];
    for i in 0..ppm.len() - 1 {
        let now = ppm[i];
        let next = ppm[i + 1];
        if (now < RC_SWITCH_THRESHOLD && next >= RC_SWITCH_THRESHOLD)
            || (now >= RC_SWITCH_THRESHOLD && next < RC_SWITCH_THRESHOLD)
        {
            times.push(stamps[i]);
        }
    }
    debug!("{} transitions on {}", times.len(), col);

    Ok(times)
}

// -----
