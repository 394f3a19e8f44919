//! Distance metric used throughout the engine.
//!
//! Aircraft on the ground a few metres apart must resolve as distinct spots,
//! so the surface component is a proper WGS84 geodesic rather than a flat
//! approximation.
//!

use geo::{point, GeodesicDistance};

use fcbox_formats::Pos;

/// Distance in metres between two logged positions.
///
/// Geodesic distance on the WGS84 ellipsoid for the surface component,
/// combined with the altitude difference as a third axis.
///
#[inline]
pub fn dist_3d(a: &Pos, b: &Pos) -> f64 {
    let pa = point!(x: a.lng, y: a.lat);
    let pb = point!(x: b.lng, y: b.lat);

    let surface = pa.geodesic_distance(&pb);
    let dalt = a.alt - b.alt;

    (surface.powi(2) + dalt.powi(2)).sqrt()
}

// -----

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lng: f64, alt: f64) -> Pos {
        Pos {
            lat,
            lng,
            alt,
            timestamp: 0.,
            index: 0,
        }
    }

    #[test]
    fn test_dist_3d_same_point_is_zero() {
        let a = pos(48.573174, 2.319671, 115.);

        assert_eq!(0., dist_3d(&a, &a));
    }

    #[test]
    fn test_dist_3d_symmetric() {
        let a = pos(48.573174, 2.319671, 115.);
        let b = pos(48.566757, 2.303015, 122.);

        assert_eq!(dist_3d(&a, &b), dist_3d(&b, &a));
    }

    #[test]
    fn test_dist_3d_altitude_only() {
        let a = pos(48.573174, 2.319671, 100.);
        let b = pos(48.573174, 2.319671, 110.);

        assert_eq!(10., dist_3d(&a, &b));
    }

    #[test]
    fn test_dist_3d_meridian_arc() {
        // 0.001 degree of latitude at the equator is 110.574 m.
        //
        let a = pos(0., 0., 0.);
        let b = pos(0.001, 0., 0.);

        let d = dist_3d(&a, &b);
        assert!((d - 110.574).abs() < 0.5, "got {}", d);
    }
}
