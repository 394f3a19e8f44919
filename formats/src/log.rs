//! Tabular view of a parsed flight-controller log.
//!
//! A log dump directory holds one CSV file per message type (`POS.csv`,
//! `RCIN.csv`, ...), each with a mandatory `timestamp` column in seconds since
//! log start and any number of numeric columns.  [`FlightLog::load`] reads the
//! types it is asked for and keeps every stream that validates; a stream that
//! is empty, ragged or out of order is reported and dropped, which the rest of
//! the workspace observes as "stream absent".
//!

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use eyre::{eyre, Result};
use tracing::{debug, trace, warn};

use crate::Status;

/// Name of the mandatory time column in every stream.
pub const TIMESTAMP: &str = "timestamp";

/// First and last timestamps of a stream, in seconds since log start.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Length of the range in seconds.
    ///
    #[inline]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// One message stream out of a log: timestamps plus named numeric columns.
///
/// Invariants, checked on construction: at least one sample, timestamps in
/// non-decreasing order, every column as long as the timestamps.
///
#[derive(Clone, Debug)]
pub struct Stream {
    name: String,
    timestamps: Vec<f64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl Stream {
    /// Build a validated stream.
    ///
    pub fn new(
        name: &str,
        timestamps: Vec<f64>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Stream, Status> {
        if timestamps.is_empty() {
            return Err(Status::EmptyStream(name.to_string()));
        }
        // NaN fails the comparison as well
        //
        if timestamps.windows(2).any(|w| !(w[0] <= w[1])) {
            return Err(Status::UnsortedTimestamps(name.to_string()));
        }
        if columns.values().any(|c| c.len() != timestamps.len()) {
            return Err(Status::RaggedColumns(name.to_string()));
        }
        Ok(Stream {
            name: name.to_string(),
            timestamps,
            columns,
        })
    }

    /// Read one `<NAME>.csv` file out of a dump directory.
    ///
    /// Non-numeric columns are dropped with a notice, the rest of the file
    /// must satisfy the [`Stream::new`] invariants.
    ///
    #[tracing::instrument]
    pub fn read_file(name: &str, fname: &Path) -> Result<Stream> {
        trace!("Reading {:?}", fname);

        let mut rdr = ReaderBuilder::new().from_path(fname)?;
        let headers = rdr.headers()?.clone();

        let mut rows = vec![];
        for record in rdr.records() {
            rows.push(record?);
        }

        // Parse column by column so one bad column does not sink the stream.
        //
        let mut timestamps: Option<Vec<f64>> = None;
        let mut columns = BTreeMap::new();
        for (idx, field) in headers.iter().enumerate() {
            let parsed: Option<Vec<f64>> = rows
                .iter()
                .map(|r| r.get(idx).and_then(|v| v.trim().parse::<f64>().ok()))
                .collect();
            match parsed {
                Some(values) => {
                    if field == TIMESTAMP {
                        timestamps = Some(values);
                    } else {
                        columns.insert(field.to_string(), values);
                    }
                }
                None => {
                    if field == TIMESTAMP {
                        return Err(Status::MissingTimestamp(name.to_string()).into());
                    }
                    debug!("{}: dropping non-numeric column {}", name, field);
                }
            }
        }
        let timestamps = timestamps.ok_or_else(|| Status::MissingTimestamp(name.to_string()))?;

        Ok(Stream::new(name, timestamps, columns)?)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of samples, always at least 1.
    ///
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[inline]
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Look a named column up.
    ///
    #[inline]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Index of the sample whose timestamp is nearest to `t`.
    ///
    /// `t` outside the range clamps to the boundary sample.  A tie between two
    /// samples, and duplicate timestamps, both resolve to the lowest index.
    ///
    pub fn nearest_index(&self, t: f64) -> usize {
        let ts = &self.timestamps;
        let n = ts.len();

        let i = ts.partition_point(|&x| x < t);
        if i == 0 {
            return 0;
        }
        if i == n {
            return n - 1;
        }

        let mut j = if (t - ts[i - 1]) <= (ts[i] - t) { i - 1 } else { i };

        // Duplicate timestamps collapse onto their first occurrence.
        //
        while j > 0 && ts[j - 1] == ts[j] {
            j -= 1;
        }
        j
    }

    /// First and last timestamps.
    ///
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.timestamps[0],
            end: self.timestamps[self.timestamps.len() - 1],
        }
    }
}

/// A loaded log dump: every stream that could be read, keyed by message type.
///
#[derive(Clone, Debug)]
pub struct FlightLog {
    path: PathBuf,
    streams: BTreeMap<String, Stream>,
}

impl FlightLog {
    /// Load the given message types from a dump directory.
    ///
    /// Message types without a file are silently skipped, files that fail to
    /// validate are reported and skipped.  Only a missing or unreadable
    /// directory is an error.
    ///
    #[tracing::instrument]
    pub fn load(dir: &Path, types: &[String]) -> Result<FlightLog> {
        trace!("enter");

        if !dir.is_dir() {
            return Err(eyre!("{:?} is not a log dump directory", dir));
        }

        let mut streams = BTreeMap::new();
        for name in types {
            let fname = dir.join(format!("{}.csv", name));
            if !fname.exists() {
                trace!("no {} in this log", name);
                continue;
            }
            match Stream::read_file(name, &fname) {
                Ok(s) => {
                    debug!("{}: {} messages", name, s.len());
                    streams.insert(name.clone(), s);
                }
                Err(e) => warn!("skipping {}: {}", name, e),
            }
        }

        Ok(FlightLog {
            path: dir.to_path_buf(),
            streams,
        })
    }

    /// Assemble a log from already validated streams.
    ///
    /// Used by tools and tests that synthesise telemetry instead of reading
    /// a dump directory.
    ///
    pub fn from_streams(name: &str, streams: Vec<Stream>) -> FlightLog {
        let streams = streams
            .into_iter()
            .map(|s| (s.name().to_string(), s))
            .collect();
        FlightLog {
            path: PathBuf::from(name),
            streams,
        }
    }

    /// Directory this log was loaded from.
    ///
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All loaded streams, in name order.
    ///
    pub fn streams(&self) -> impl Iterator<Item = (&str, &Stream)> {
        self.streams.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Typed accessor for a stream, `None` when the log does not carry it.
    ///
    #[inline]
    pub fn stream(&self, name: &str) -> Option<&Stream> {
        self.streams.get(name)
    }

    /// Names of all loaded streams.
    ///
    pub fn stream_names(&self) -> Vec<&str> {
        self.streams.keys().map(|s| s.as_str()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;

    use super::*;

    fn sample() -> Stream {
        let mut columns = BTreeMap::new();
        columns.insert("Alt".to_string(), vec![10., 11., 12., 13.]);
        Stream::new("POS", vec![0., 1., 2., 4.], columns).unwrap()
    }

    #[rstest]
    #[case(-5.0, 0)]
    #[case(0.0, 0)]
    #[case(0.9, 1)]
    #[case(1.5, 1)]
    #[case(3.0, 2)]
    #[case(3.9, 3)]
    #[case(99.0, 3)]
    fn test_nearest_index(#[case] t: f64, #[case] expected: usize) {
        assert_eq!(expected, sample().nearest_index(t));
    }

    #[test]
    fn test_nearest_index_duplicates() {
        let s = Stream::new("POS", vec![0., 2., 2., 3.], BTreeMap::new()).unwrap();

        // First occurrence of the duplicate wins, exact or not.
        //
        assert_eq!(1, s.nearest_index(2.0));
        assert_eq!(1, s.nearest_index(2.4));
    }

    #[test]
    fn test_time_range() {
        let r = sample().time_range();
        assert_eq!(0., r.start);
        assert_eq!(4., r.end);
        assert_eq!(4., r.span());
    }

    #[test]
    fn test_stream_empty() {
        let s = Stream::new("POS", vec![], BTreeMap::new());
        assert!(matches!(s, Err(Status::EmptyStream(_))));
    }

    #[test]
    fn test_stream_unsorted() {
        let s = Stream::new("POS", vec![0., 2., 1.], BTreeMap::new());
        assert!(matches!(s, Err(Status::UnsortedTimestamps(_))));
    }

    #[test]
    fn test_stream_nan_timestamp() {
        let s = Stream::new("POS", vec![0., f64::NAN, 2.], BTreeMap::new());
        assert!(matches!(s, Err(Status::UnsortedTimestamps(_))));
    }

    #[test]
    fn test_stream_ragged() {
        let mut columns = BTreeMap::new();
        columns.insert("Alt".to_string(), vec![10.]);
        let s = Stream::new("POS", vec![0., 1.], columns);
        assert!(matches!(s, Err(Status::RaggedColumns(_))));
    }

    #[test]
    fn test_read_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let fname = tmp.path().join("POS.csv");
        fs::write(
            &fname,
            "timestamp,Lat,Lng,Alt,Label\n0.0,51.5,-0.1,10.0,takeoff\n1.0,51.6,-0.2,11.0,cruise\n",
        )?;

        let s = Stream::read_file("POS", &fname)?;
        assert_eq!(2, s.len());
        assert_eq!(Some(&[51.5, 51.6][..]), s.column("Lat"));

        // Text column got dropped.
        //
        assert!(!s.has_column("Label"));
        assert!(!s.has_column(TIMESTAMP));
        Ok(())
    }

    #[test]
    fn test_read_file_no_timestamp() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let fname = tmp.path().join("POS.csv");
        fs::write(&fname, "Lat,Lng\n51.5,-0.1\n")?;

        assert!(Stream::read_file("POS", &fname).is_err());
        Ok(())
    }

    #[test]
    fn test_load_dump() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(
            tmp.path().join("POS.csv"),
            "timestamp,Lat,Lng,Alt\n0.0,51.5,-0.1,10.0\n",
        )?;
        fs::write(tmp.path().join("GPS.csv"), "timestamp,NSats\nbroken\n")?;

        let types = vec!["POS".to_string(), "GPS".to_string(), "RCIN".to_string()];
        let log = FlightLog::load(tmp.path(), &types)?;

        // POS loads, GPS is ragged and dropped, RCIN has no file.
        //
        assert_eq!(vec!["POS"], log.stream_names());
        assert!(log.stream("GPS").is_none());
        assert!(log.stream("RCIN").is_none());
        Ok(())
    }

    #[test]
    fn test_load_missing_dir() {
        let types = vec!["POS".to_string()];
        assert!(FlightLog::load(Path::new("/nonexistent"), &types).is_err());
    }
}
