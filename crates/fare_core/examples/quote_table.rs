//! Quote the demo fleet for a downtown-to-airport route and print the results.
//!
//! Run with: cargo run -p fare_core --example quote_table

use fare_core::quotes::build_quotes;
use fare_core::routing::{RouteEstimator, StraightLineEstimator};
use fare_core::test_helpers::{airport_cell, demo_fleet, pickup_cell};

fn main() {
    let estimator = StraightLineEstimator::default();
    let Some(estimate) = estimator.estimate(pickup_cell(), airport_cell()) else {
        eprintln!("no route estimate available");
        return;
    };

    println!(
        "--- Route: downtown -> airport ({} mi, {} min) ---",
        estimate.distance_miles,
        estimate.duration_seconds / 60
    );

    let fleet = demo_fleet();
    let batch = build_quotes(&estimate, &fleet);

    for quote in &batch.quotes {
        println!("{:<12} ${:.2}", quote.display_name, quote.estimated_fare);
    }
    for failure in &batch.failures {
        println!("{:<12} unavailable ({})", failure.slug, failure.error);
    }

    if let Some(quote) = batch.quotes.first() {
        println!("\n{} breakdown:", quote.display_name);
        for line in quote.breakdown.lines() {
            println!("  {:<34} ${:>8.2}  [{}]", line.label, line.amount, line.key);
        }
    }
}
