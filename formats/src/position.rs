//! Position types and the position-source probe.
//!
//! A log may carry several message types with usable positions.  Only three
//! are recognized, probed in fixed priority order: `POS` (filtered position
//! output), `XKF1` (EKF state estimate), `GPS` (raw receiver).  The first one
//! present wins for the whole session.
//!

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::trace;

use crate::{FlightLog, Stream, TimeRange};

/// Latitude column name in position streams.
const LAT: &str = "Lat";
/// Longitude column name in position streams.
const LNG: &str = "Lng";
/// Altitude column name in position streams.
const ALT: &str = "Alt";

/// A 3D position sample at a point in time.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Pos {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Altitude in metres.
    pub alt: f64,
    /// Seconds since log start.
    pub timestamp: f64,
    /// Index of the sample in its source stream.
    pub index: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {:.7}  Lng: {:.7}  Alt: {:.2}",
            self.lat, self.lng, self.alt
        )
    }
}

/// The recognized position message types, in priority order.
///
#[derive(
    Copy, Clone, Debug, Deserialize, PartialEq, Eq, strum::Display, EnumString, Serialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum PositionSource {
    /// Filtered position output, the preferred source.
    Pos,
    /// EKF state estimator output.
    Xkf1,
    /// Raw GPS receiver output.
    Gps,
}

impl PositionSource {
    /// Probe order, best first.
    ///
    #[inline]
    pub fn priority() -> [PositionSource; 3] {
        [PositionSource::Pos, PositionSource::Xkf1, PositionSource::Gps]
    }

    /// Pick the best source out of a set of available stream names.
    ///
    /// Pure over the names, no log needed.
    ///
    pub fn probe<I, S>(available: I) -> Option<PositionSource>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = available.into_iter().map(|s| s.as_ref().to_string()).collect();
        PositionSource::priority()
            .into_iter()
            .find(|src| names.iter().any(|n| n == &src.to_string()))
    }
}

/// Time-indexed view over the chosen position stream of a log.
///
/// Borrowing the stream keeps lookups allocation-free; the series is built
/// once per loaded log and handed to the detectors.
///
#[derive(Clone, Copy, Debug)]
pub struct PositionSeries<'a> {
    source: PositionSource,
    stream: &'a Stream,
    lat: &'a [f64],
    lng: &'a [f64],
    alt: &'a [f64],
}

impl<'a> PositionSeries<'a> {
    /// Probe the log and bind the best usable position stream.
    ///
    /// A recognized stream missing one of `Lat`/`Lng`/`Alt` counts as absent
    /// and the next source is tried.
    ///
    pub fn from_log(log: &'a FlightLog) -> Option<PositionSeries<'a>> {
        for source in PositionSource::priority() {
            if let Some(stream) = log.stream(&source.to_string()) {
                if let Some(series) = PositionSeries::from_stream(source, stream) {
                    trace!("using {} for positions", source);
                    return Some(series);
                }
            }
        }
        None
    }

    /// Bind a single stream, `None` when a position column is missing.
    ///
    pub fn from_stream(source: PositionSource, stream: &'a Stream) -> Option<PositionSeries<'a>> {
        let lat = stream.column(LAT)?;
        let lng = stream.column(LNG)?;
        let alt = stream.column(ALT)?;
        Some(PositionSeries {
            source,
            stream,
            lat,
            lng,
            alt,
        })
    }

    /// Which message type got picked.
    ///
    #[inline]
    pub fn source(&self) -> PositionSource {
        self.source
    }

    /// Number of samples, always at least 1.
    ///
    #[inline]
    pub fn len(&self) -> usize {
        self.stream.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Sample at a known-valid index.
    ///
    #[inline]
    pub fn get(&self, index: usize) -> Pos {
        Pos {
            lat: self.lat[index],
            lng: self.lng[index],
            alt: self.alt[index],
            timestamp: self.stream.timestamps()[index],
            index,
        }
    }

    /// Sample nearest in time to `t`, clamping outside the range.
    ///
    pub fn nearest(&self, t: f64) -> Pos {
        self.get(self.stream.nearest_index(t))
    }

    /// First and last sample timestamps.
    ///
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        self.stream.time_range()
    }
}
