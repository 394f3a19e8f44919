//! Candidate clustering.
//!
//! Detection yields a list of candidate times; flicking the switch twice on
//! the same spot, or parking there twice, must still count as one spot.
//! Candidates within [`CLUSTER_RADIUS_M`] of an existing cluster fold into
//! it, with the newest member becoming the representative.  A clean flight
//! ends up with exactly two clusters: pilot position and centre marker.
//!

use tracing::{debug, trace};

use fcbox_formats::{Pos, PositionSeries};

use crate::dist_3d;

/// Candidates closer than this are the same spot, in metres.
pub const CLUSTER_RADIUS_M: f64 = 5.;

/// One usable candidate, resolved to a position.
///
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub time: f64,
    pub pos: Pos,
    /// Distance to the origin position, for reporting.
    pub dist_to_origin: f64,
}

/// Everything one clustering pass produced.
///
#[derive(Clone, Debug, Default)]
pub struct Clustering {
    /// Candidate times discarded for preceding the origin.
    pub skipped: Vec<f64>,
    /// Usable candidates, in arrival order.
    pub candidates: Vec<Candidate>,
    /// Cluster representatives, in creation order.
    pub clusters: Vec<Pos>,
}

/// Resolve candidate times to positions and cluster them.
///
/// Times before the origin are noise from handling the aircraft prior to
/// arming and get skipped.  Clusters keep their creation order; each new
/// member replaces the representative, later flicks are presumed better
/// placed than the first.
///
#[tracing::instrument(skip_all)]
pub fn cluster_candidates(times: &[f64], series: &PositionSeries, origin: &Pos) -> Clustering {
    trace!("enter");

    let mut out = Clustering::default();

    for &t in times {
        if t < origin.timestamp {
            out.skipped.push(t);
            continue;
        }

        let pos = series.nearest(t);
        let dist_to_origin = dist_3d(&pos, origin);
        out.candidates.push(Candidate {
            time: t,
            pos,
            dist_to_origin,
        });

        let found = out
            .clusters
            .iter()
            .position(|c| dist_3d(&pos, c) < CLUSTER_RADIUS_M);
        match found {
            Some(i) => out.clusters[i] = pos,
            None => out.clusters.push(pos),
        }
    }
    debug!(
        "{} candidates in {} clusters, {} skipped",
        out.candidates.len(),
        out.clusters.len(),
        out.skipped.len()
    );

    out
}

// -----
