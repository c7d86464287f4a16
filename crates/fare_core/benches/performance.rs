//! Performance benchmarks for fare_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fare_core::pricing::calculate_fare;
use fare_core::quotes::build_quotes;
use fare_core::routing::{RouteEstimate, RouteEstimator, StraightLineEstimator};
use fare_core::test_helpers::{
    airport_cell, demo_fleet, pickup_cell, standard_profile, standard_schedule,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

fn bench_calculate_fare(c: &mut Criterion) {
    let profile = standard_profile();
    let schedule = standard_schedule();
    let trips = vec![
        ("short", 1.2, 420),
        ("city", 6.5, 1260),
        ("airport", 16.8, 2400),
        ("intercity", 48.0, 3900),
    ];

    let mut group = c.benchmark_group("calculate_fare");
    for (name, miles, seconds) in trips {
        let distance = Decimal::from_f64(miles).expect("finite distance").round_dp(2);
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(distance, seconds),
            |b, &(distance, seconds)| {
                b.iter(|| black_box(calculate_fare(distance, seconds, &profile, &schedule)));
            },
        );
    }
    group.finish();
}

fn bench_build_quotes(c: &mut Criterion) {
    // Reproducible route mix across trip lengths.
    let mut rng = StdRng::seed_from_u64(42);
    let estimates: Vec<RouteEstimate> = (0..64)
        .map(|_| {
            let miles: f64 = rng.gen_range(0.5..40.0);
            RouteEstimate {
                distance_miles: Decimal::from_f64(miles).expect("finite distance").round_dp(2),
                duration_seconds: (miles / 25.0 * 3600.0) as u64,
            }
        })
        .collect();
    let fleet = demo_fleet();

    c.bench_function("build_quotes_demo_fleet_64_routes", |b| {
        b.iter(|| {
            for estimate in &estimates {
                black_box(build_quotes(estimate, &fleet));
            }
        });
    });
}

fn bench_straight_line_estimator(c: &mut Criterion) {
    let estimator = StraightLineEstimator::default();
    let (from, to) = (pickup_cell(), airport_cell());

    c.bench_function("straight_line_estimate_cached", |b| {
        b.iter(|| black_box(estimator.estimate(from, to)));
    });
}

criterion_group!(
    benches,
    bench_calculate_fare,
    bench_build_quotes,
    bench_straight_line_estimator
);
criterion_main!(benches);
