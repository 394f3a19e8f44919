//! Run the stationary scan and clustering over a synthetic taxi profile,
//! no log dump needed.
//!
use std::collections::BTreeMap;

use fcbox_engine::{cluster_candidates, find_static_position_times, ScanParams};
use fcbox_formats::{PositionSeries, PositionSource, Stream};

fn main() -> eyre::Result<()> {
    // Half-second samples: parked, taxi north, parked again.
    //
    let mut lats = Vec::new();
    for i in 0..=160 {
        let step = match i {
            0..=60 => 0.,
            61..=79 => (i - 60) as f64 * 0.0001,
            80..=140 => 0.002,
            _ => 0.002 + (i - 140) as f64 * 0.0001,
        };
        lats.push(51.462796 + step);
    }
    let n = lats.len();
    let timestamps: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();

    let mut columns = BTreeMap::new();
    columns.insert("Lat".to_string(), lats);
    columns.insert("Lng".to_string(), vec![-1.029479; n]);
    columns.insert("Alt".to_string(), vec![57.; n]);

    let stream = Stream::new("POS", timestamps, columns)?;
    let series = PositionSeries::from_stream(PositionSource::Pos, &stream)
        .ok_or_else(|| eyre::eyre!("no position columns"))?;

    let params = ScanParams {
        window_secs: 8.,
        tolerance_metres: 1.,
        hysteresis: 3.,
    };
    let periods = find_static_position_times(&series, &params);
    for p in &periods {
        println!(
            "stationary {:.1}s..{:.1}s, measuring at {:.2}s",
            p.start, p.end, p.measure_time
        );
    }

    let origin = series.nearest(2.5);
    let times: Vec<f64> = periods.iter().map(|p| p.measure_time).collect();
    let out = cluster_candidates(&times, &series, &origin);
    for (i, c) in out.clusters.iter().enumerate() {
        println!("cluster {}: {}", i + 1, c);
    }

    Ok(())
}
