//! Stationary period detection.
//!
//! Fallback for logs recorded without a spare switch: the aircraft sitting
//! still on a spot for a while is itself the signal.  A window of fixed width
//! slides over the position series in half-second steps and compares the
//! positions at its two edges; while they stay within tolerance the aircraft
//! is considered parked.
//!

use tracing::{debug, trace};

use fcbox_common::StaticPositions;
use fcbox_formats::PositionSeries;

use crate::dist_3d;

/// Cursor advance per scan step, in seconds.
pub const SCAN_STEP_SECS: f64 = 0.5;

/// Fraction into a stationary interval at which the position is sampled.
///
/// Biased toward the end, by then the aircraft has settled and the GPS
/// solution has had time to converge.
///
const MEASURE_BIAS: f64 = 0.7;

/// Detection parameters, straight out of the configuration.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanParams {
    /// Width of the sliding window in seconds.
    pub window_secs: f64,
    /// Window edges closer than this are "not moving", in metres.
    pub tolerance_metres: f64,
    /// A finished period only re-arms once the edges exceed
    /// `tolerance_metres * hysteresis`.
    pub hysteresis: f64,
}

impl From<&StaticPositions> for ScanParams {
    fn from(cfg: &StaticPositions) -> Self {
        ScanParams {
            window_secs: cfg.window_secs,
            tolerance_metres: cfg.tolerance_metres,
            hysteresis: cfg.hysteresis,
        }
    }
}

/// One detected stationary interval.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StationaryPeriod {
    pub start: f64,
    pub end: f64,
    /// Time at which to sample the position, 70% into the interval.
    pub measure_time: f64,
}

impl StationaryPeriod {
    fn new(start: f64, end: f64) -> Self {
        StationaryPeriod {
            start,
            end,
            measure_time: start + (end - start) * MEASURE_BIAS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ScanState {
    SeekingStart,
    SeekingEnd,
    Hysteresis,
}

/// Scan the whole series for stationary periods.
///
pub fn find_static_position_times(
    series: &PositionSeries,
    params: &ScanParams,
) -> Vec<StationaryPeriod> {
    scan_static_positions(series, params, |_| true)
}

/// Same scan with a progress hook.
///
/// `on_step` receives the cursor time at every step; returning `false`
/// abandons the scan and yields the periods found so far.
///
#[tracing::instrument(skip(series, on_step))]
pub fn scan_static_positions(
    series: &PositionSeries,
    params: &ScanParams,
    mut on_step: impl FnMut(f64) -> bool,
) -> Vec<StationaryPeriod> {
    trace!("enter");

    let range = series.time_range();
    let mut periods = vec![];

    let mut state = ScanState::SeekingStart;
    let mut start = range.start;
    let mut t = range.start;

    while t + params.window_secs < range.end {
        if !on_step(t) {
            debug!("scan abandoned at {:.1}s", t);
            return periods;
        }

        let lead = series.nearest(t + params.window_secs);
        let trail = series.nearest(t);
        let d = dist_3d(&trail, &lead);

        match state {
            ScanState::SeekingStart => {
                if d <= params.tolerance_metres {
                    start = t;
                    state = ScanState::SeekingEnd;
                }
            }
            ScanState::SeekingEnd => {
                if d > params.tolerance_metres {
                    let p = StationaryPeriod::new(start, t + params.window_secs);
                    debug!("stationary {:.1}s..{:.1}s", p.start, p.end);
                    periods.push(p);
                    state = ScanState::Hysteresis;
                }
            }
            ScanState::Hysteresis => {
                if d > params.tolerance_metres * params.hysteresis {
                    state = ScanState::SeekingStart;
                }
            }
        }
        t += SCAN_STEP_SECS;
    }

    // A log that stays put to the very end leaves the last interval open,
    // close it at the final cursor position.
    //
    if state == ScanState::SeekingEnd {
        let p = StationaryPeriod::new(start, t);
        debug!("stationary {:.1}s..{:.1}s (open at end of log)", p.start, p.end);
        periods.push(p);
    }

    periods
}

// -----

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use fcbox_formats::{PositionSource, Stream};

    use super::*;

    /// One sample every half second; latitude in degrees, everything else flat.
    fn stream_of(lats: &[f64]) -> Stream {
        let timestamps: Vec<f64> = (0..lats.len()).map(|i| i as f64 * 0.5).collect();
        let n = lats.len();

        let mut columns = BTreeMap::new();
        columns.insert("Lat".to_string(), lats.to_vec());
        columns.insert("Lng".to_string(), vec![0.; n]);
        columns.insert("Alt".to_string(), vec![0.; n]);

        Stream::new("POS", timestamps, columns).unwrap()
    }

    fn params() -> ScanParams {
        ScanParams {
            window_secs: 8.,
            tolerance_metres: 1.,
            hysteresis: 3.,
        }
    }

    /// Roughly 11 m on the ground per step.
    const MOVING_STEP_DEG: f64 = 0.0001;

    #[test]
    fn test_scan_flat_series_flushes_open_interval() {
        // 41 samples, 20 s of sitting still.
        let stream = stream_of(&vec![48.5; 41]);
        let series = PositionSeries::from_stream(PositionSource::Pos, &stream).unwrap();

        let periods = find_static_position_times(&series, &params());

        assert_eq!(1, periods.len());
        assert_eq!(0., periods[0].start);
        assert_eq!(12., periods[0].end);
        assert!((periods[0].measure_time - 8.4).abs() < 1e-9);
    }

    #[test]
    fn test_scan_move_stop_move() {
        // Taxi out for 10 s, park for 20 s, taxi off for 10 s.
        let mut lats = vec![];
        for i in 0..20 {
            lats.push(i as f64 * MOVING_STEP_DEG);
        }
        let parked = 20. * MOVING_STEP_DEG;
        for _ in 20..=60 {
            lats.push(parked);
        }
        for i in 61..=80 {
            lats.push(parked + (i - 60) as f64 * MOVING_STEP_DEG);
        }
        let stream = stream_of(&lats);
        let series = PositionSeries::from_stream(PositionSource::Pos, &stream).unwrap();

        let periods = find_static_position_times(&series, &params());

        assert_eq!(1, periods.len());
        let p = periods[0];
        assert_eq!(10., p.start);
        assert_eq!(30.5, p.end);
        assert!((p.measure_time - 24.35).abs() < 1e-9);
    }

    #[test]
    fn test_scan_hysteresis_holds_after_small_shift() {
        // Park, creep 2 m forward, park again.  The creep ends the first
        // period but never exceeds three times the tolerance, so the scan
        // stays in hysteresis and the second spot is not reported.
        let shifted = 0.000018;
        let mut lats = vec![0.; 41];
        lats.extend(vec![shifted; 40]);
        let stream = stream_of(&lats);
        let series = PositionSeries::from_stream(PositionSource::Pos, &stream).unwrap();

        let periods = find_static_position_times(&series, &params());

        assert_eq!(1, periods.len());
        assert_eq!(0., periods[0].start);
        assert_eq!(20.5, periods[0].end);
    }

    #[test]
    fn test_scan_rearms_after_large_shift() {
        // Same shape but the hop is about 40 m, well past the hysteresis
        // band, so the second spot is found too.
        let shifted = 0.00036;
        let mut lats = vec![0.; 41];
        lats.extend(vec![shifted; 40]);
        let stream = stream_of(&lats);
        let series = PositionSeries::from_stream(PositionSource::Pos, &stream).unwrap();

        let periods = find_static_position_times(&series, &params());

        assert_eq!(2, periods.len());
        assert_eq!(0., periods[0].start);
        assert_eq!(20.5, periods[0].end);
        assert_eq!(20.5, periods[1].start);
        assert_eq!(32., periods[1].end);
    }

    #[test]
    fn test_scan_window_wider_than_log() {
        let stream = stream_of(&vec![48.5; 10]);
        let series = PositionSeries::from_stream(PositionSource::Pos, &stream).unwrap();

        let p = ScanParams {
            window_secs: 30.,
            ..params()
        };
        assert!(find_static_position_times(&series, &p).is_empty());
    }

    #[test]
    fn test_scan_callback_sees_every_step_and_can_cancel() {
        let stream = stream_of(&vec![48.5; 41]);
        let series = PositionSeries::from_stream(PositionSource::Pos, &stream).unwrap();

        let mut seen = vec![];
        let periods = scan_static_positions(&series, &params(), |t| {
            seen.push(t);
            t < 3.
        });

        // Cancelled mid-scan: the open interval is not flushed.
        assert!(periods.is_empty());
        assert_eq!(vec![0., 0.5, 1., 1.5, 2., 2.5, 3.], seen);
    }
}
