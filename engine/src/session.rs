//! Analysis session.
//!
//! Owns the configuration, at most one opened log and whatever the last
//! extraction produced.  The CLI drives one of these per invocation; the
//! structured reports coming back carry everything worth printing.
//!

use std::path::Path;

use eyre::Result;
use tracing::{debug, trace};

use fcbox_common::Config;
use fcbox_formats::{F3aZone, FlightLog, Pos, PositionSeries, PositionSource};

use crate::{
    cluster_candidates, find_rc_switch_times, scan_static_positions, Clustering, ScanParams,
    StationaryPeriod, Status,
};

/// Seconds past the first position sample where the origin is taken.
///
/// Right at power-up the GPS solution is still wandering, a couple of
/// seconds in it has usually settled.
///
pub const ORIGIN_OFFSET_SECS: f64 = 2.5;

/// Which detector supplied the candidate times that got used.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detection {
    /// Transitions of the given RC channel.
    Switch(u8),
    /// Stationary period scan.
    Stationary,
}

/// How an extraction attempt ended.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly two clusters, the box is set.
    Extracted,
    /// Fewer than two usable times, nothing to cluster.
    NotEnoughCandidates,
    /// Any other cluster count leaves the box explicitly unset.
    Unclear(usize),
}

/// What a freshly opened log looks like.
///
#[derive(Clone, Debug)]
pub struct OpenReport {
    /// Stream names with message counts.
    pub streams: Vec<(String, usize)>,
    /// Position source picked, when one is usable.
    pub source: Option<PositionSource>,
    /// Resolved origin position.
    pub origin: Option<Pos>,
}

/// Structured trace of one extraction attempt.
///
#[derive(Debug)]
pub struct Extraction {
    /// Channel the switch pass looked at, 0 when disabled.
    pub channel: u8,
    /// Transition count from the switch pass, when one ran.
    pub switch: Option<Result<usize, Status>>,
    /// Stationary periods, when that scan ran.
    pub periods: Vec<StationaryPeriod>,
    /// Detector the candidate times actually came from.
    pub method: Detection,
    /// Candidate times handed to clustering.
    pub times: Vec<f64>,
    pub clustering: Clustering,
    pub outcome: Outcome,
}

/// One log being analysed.
///
#[derive(Debug)]
pub struct Session {
    config: Config,
    log: Option<FlightLog>,
    source: Option<PositionSource>,
    origin: Option<Pos>,
    zone: F3aZone,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            config,
            log: None,
            source: None,
            origin: None,
            zone: F3aZone::new(),
        }
    }

    /// Open a log dump directory and resolve the origin.
    ///
    /// The configuration remembers the location so the next run picks it up
    /// as its default.
    ///
    #[tracing::instrument(skip(self))]
    pub fn open(&mut self, dir: &Path) -> Result<OpenReport> {
        trace!("enter");

        let types = self.config.open_file.message_types.clone();
        let log = FlightLog::load(dir, &types)?;

        let streams = log
            .streams()
            .map(|(name, s)| (name.to_string(), s.len()))
            .collect();

        let (source, origin) = match PositionSeries::from_log(&log) {
            Some(series) => {
                let at = series.time_range().start + ORIGIN_OFFSET_SECS;
                let origin = series.nearest(at);
                debug!("origin at {}s using {}", origin.timestamp, series.source());
                (Some(series.source()), Some(origin))
            }
            None => (None, None),
        };

        self.source = source;
        self.origin = origin;
        self.log = Some(log);

        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        self.config.open_file.path = dir
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.config.open_file.file = dir.file_name().map(|f| f.to_string_lossy().into_owned());

        Ok(OpenReport {
            streams,
            source,
            origin,
        })
    }

    /// Run the full extraction on the opened log.
    ///
    /// `channel` overrides (and updates) the configured RC channel.  With a
    /// channel of 0, or fewer than two transitions on it, detection falls
    /// back to the stationary period scan.
    ///
    pub fn extract(&mut self, channel: Option<u8>) -> Result<Extraction, Status> {
        self.extract_with(channel, |_| true)
    }

    /// Same extraction with a progress hook for the stationary scan.
    ///
    #[tracing::instrument(skip(self, on_step))]
    pub fn extract_with(
        &mut self,
        channel: Option<u8>,
        on_step: impl FnMut(f64) -> bool,
    ) -> Result<Extraction, Status> {
        trace!("enter");

        if let Some(n) = channel {
            self.config.find_rc_switch_times.rc_switch_channel = n;
        }
        let channel = self.config.find_rc_switch_times.rc_switch_channel;

        let log = self.log.as_ref().ok_or(Status::NoLogLoaded)?;
        let series = PositionSeries::from_log(log).ok_or(Status::NoPositionSource)?;
        let origin = self.origin.ok_or(Status::NoPositionSource)?;

        let mut switch = None;
        let mut method = Detection::Stationary;
        let mut times = vec![];
        if channel > 0 {
            match find_rc_switch_times(log, channel) {
                Ok(ts) => {
                    switch = Some(Ok(ts.len()));
                    method = Detection::Switch(channel);
                    times = ts;
                }
                Err(e) => switch = Some(Err(e)),
            }
        }

        let mut periods = vec![];
        if times.len() < 2 {
            let params = ScanParams::from(&self.config.find_static_position_times);
            periods = scan_static_positions(&series, &params, on_step);
            times = periods.iter().map(|p| p.measure_time).collect();
            method = Detection::Stationary;
        }

        if times.len() < 2 {
            debug!("only {} candidate times", times.len());
            return Ok(Extraction {
                channel,
                switch,
                periods,
                method,
                times,
                clustering: Clustering::default(),
                outcome: Outcome::NotEnoughCandidates,
            });
        }

        let clustering = cluster_candidates(&times, &series, &origin);
        let outcome = if clustering.clusters.len() == 2 {
            self.zone.set(clustering.clusters[0], clustering.clusters[1]);
            Outcome::Extracted
        } else {
            self.zone.unset();
            Outcome::Unclear(clustering.clusters.len())
        };

        Ok(Extraction {
            channel,
            switch,
            periods,
            method,
            times,
            clustering,
            outcome,
        })
    }

    /// Write the box out in the scoring program's format.
    ///
    #[tracing::instrument(skip(self))]
    pub fn save(&self, fname: &Path) -> Result<()> {
        trace!("enter");

        if !self.zone.valid() {
            return Err(Status::NoZoneToWrite.into());
        }
        self.zone.write(fname)
    }

    // -----

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Opened log, if any.
    pub fn log(&self) -> Result<&FlightLog, Status> {
        self.log.as_ref().ok_or(Status::NoLogLoaded)
    }

    #[inline]
    pub fn source(&self) -> Option<PositionSource> {
        self.source
    }

    #[inline]
    pub fn origin(&self) -> Option<Pos> {
        self.origin
    }

    #[inline]
    pub fn zone(&self) -> &F3aZone {
        &self.zone
    }
}

// -----
