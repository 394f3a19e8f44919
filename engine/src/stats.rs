//! GPS quality and message rate statistics.
//!

use std::fmt;

use tracing::trace;

use fcbox_formats::{FlightLog, Stream};

use crate::Status;

/// Sample counts below this are too short to trim meaningfully.
const MIN_SAMPLES: usize = 1000;

const GPA: &str = "GPA";
const GPS: &str = "GPS";
const HACC: &str = "HAcc";
const VACC: &str = "VAcc";
const NSATS: &str = "NSats";

/// Minimum, mean and maximum over the middle of a series.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MinAvgMax {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl fmt::Display for MinAvgMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}, {:.1}]", self.min, self.avg, self.max)
    }
}

/// Stats over the middle 70% of samples.
///
/// The trim is by position, not by value: the ends of a chronological series
/// hold the power-up and recovery noise.  Series shorter than
/// [`MIN_SAMPLES`] return zeroes.
///
pub fn min_avg_max(values: &[f64]) -> MinAvgMax {
    let n = values.len();
    if n < MIN_SAMPLES {
        return MinAvgMax::default();
    }

    let st = (n as f64 * 0.15) as usize;
    let en = (n as f64 * 0.85) as usize;
    let mid = &values[st..en];

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.;
    for &v in mid {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }

    MinAvgMax {
        min,
        avg: sum / mid.len() as f64,
        max,
    }
}

/// GPS solution quality over a whole log.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GpsAccuracy {
    /// Horizontal accuracy in metres.
    pub hacc: MinAvgMax,
    /// Vertical accuracy in metres.
    pub vacc: MinAvgMax,
    /// Visible satellite count.
    pub nsats: MinAvgMax,
}

impl fmt::Display for GpsAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Accuracy  (min,avg,max):  H {}m   V {}m",
            self.hacc, self.vacc
        )?;
        write!(f, "Sat Count (min,avg,max):  {}", self.nsats)
    }
}

/// Accuracy figures from the GPA stream plus satellite counts from GPS.
///
#[tracing::instrument(skip(log))]
pub fn gps_accuracy(log: &FlightLog) -> Result<GpsAccuracy, Status> {
    trace!("enter");

    let missing = || Status::MissingStream("GPS or GPA".to_string());

    let gpa = log.stream(GPA).ok_or_else(missing)?;
    let gps = log.stream(GPS).ok_or_else(missing)?;
    let hacc = gpa.column(HACC).ok_or_else(missing)?;
    let vacc = gpa.column(VACC).ok_or_else(missing)?;
    let nsats = gps.column(NSATS).ok_or_else(missing)?;

    Ok(GpsAccuracy {
        hacc: min_avg_max(hacc),
        vacc: min_avg_max(vacc),
        nsats: min_avg_max(nsats),
    })
}

/// Count and cadence of one stream.
///
#[derive(Clone, Debug, PartialEq)]
pub struct MessageRate {
    pub name: String,
    pub count: usize,
    pub freq_hz: f64,
    pub period_ms: f64,
}

/// Average rate of a stream over its time range.
///
pub fn message_rate(stream: &Stream) -> MessageRate {
    let n = stream.len();
    let period = stream.time_range().span() / n as f64;
    let freq = if period > 0. { 1. / period } else { 0. };

    MessageRate {
        name: stream.name().to_string(),
        count: n,
        freq_hz: freq,
        period_ms: period * 1000.,
    }
}

// -----
