use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geo::point;
use geo::prelude::*;

use fcbox_engine::dist_3d;
use fcbox_formats::Pos;

struct Pt {
    latitude: f64,
    longitude: f64,
}

impl Pt {
    const R: f64 = 6_371_088.0; // Earth radius in meters

    fn haversine_distance(&self, other: &Pt) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin()
                * (d_lon / 2.0).sin();

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Pt::R * c
    }
}

fn setup() -> (Pt, Pt) {
    // Pilot position and centre marker of a real F3A site, about 174 m apart.
    let point1 = Pt {
        latitude: 51.462796,
        longitude: -1.029479,
    };
    let point2 = Pt {
        latitude: 51.461369,
        longitude: -1.030995,
    };
    (point1, point2)
}

fn self_haversines(c: &mut Criterion) {
    let (point1, point2) = setup();

    c.bench_function("self::haversines", move |b| {
        b.iter(|| {
            black_box(point1.haversine_distance(&point2));
        })
    });
}

fn geo_geodesic(c: &mut Criterion) {
    let (point1, point2) = setup();

    let p1 = point!(x: point1.longitude, y: point1.latitude);
    let p2 = point!(x: point2.longitude, y: point2.latitude);

    c.bench_function("geo::geodesic", |b| {
        b.iter(|| {
            black_box(p1.geodesic_distance(&p2));
        })
    });
}

fn geo_haversines(c: &mut Criterion) {
    let (point1, point2) = setup();

    let p1 = point!(x: point1.longitude, y: point1.latitude);
    let p2 = point!(x: point2.longitude, y: point2.latitude);

    c.bench_function("geo::haversines", |b| {
        b.iter(|| {
            black_box(p1.haversine_distance(&p2));
        })
    });
}

fn engine_dist_3d(c: &mut Criterion) {
    let (point1, point2) = setup();

    let p1 = Pos {
        lat: point1.latitude,
        lng: point1.longitude,
        alt: 57.2,
        timestamp: 0.,
        index: 0,
    };
    let p2 = Pos {
        lat: point2.latitude,
        lng: point2.longitude,
        alt: 58.9,
        timestamp: 1.,
        index: 1,
    };

    c.bench_function("engine::dist_3d", |b| {
        b.iter(|| {
            black_box(dist_3d(&p1, &p2));
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = self_haversines, geo_geodesic, geo_haversines, engine_dist_3d
}

criterion_main!(benches);
