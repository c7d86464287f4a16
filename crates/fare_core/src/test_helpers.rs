//! Shared fixtures: canonical tariffs and test geography.
//!
//! Compiled under the default `test-helpers` feature so unit tests,
//! integration tests, benchmarks, and examples all quote the same fleet.

use h3o::{CellIndex, LatLng, Resolution};
use rust_decimal_macros::dec;

use crate::profile::VehicleFareProfile;
use crate::quotes::{VehicleClass, VehicleTariff};
use crate::schedule::{MileageTier, TierSchedule};

/// A valid H3 cell at resolution 9 in the San Francisco Bay Area.
pub const TEST_CELL: u64 = 0x8a1fb46622dffff;

/// Get the test cell as a `CellIndex`.
///
/// # Panics
///
/// Panics if the test cell constant is invalid (should never happen).
pub fn test_cell() -> CellIndex {
    CellIndex::try_from(TEST_CELL).expect("TEST_CELL should be a valid H3 cell")
}

/// Get a neighbor cell of the test cell.
///
/// # Panics
///
/// Panics if no neighbor can be found (should never happen with a valid test cell).
pub fn test_neighbor_cell() -> CellIndex {
    test_cell()
        .grid_disk::<Vec<_>>(1)
        .into_iter()
        .find(|c| *c != test_cell())
        .expect("test cell should have neighbors")
}

/// Downtown pickup cell (San Francisco, Union Square area).
pub fn pickup_cell() -> CellIndex {
    LatLng::new(37.7887, -122.4078)
        .expect("valid lat/lng")
        .to_cell(Resolution::Nine)
}

/// Airport dropoff cell (SFO), roughly 12 straight-line miles from pickup.
pub fn airport_cell() -> CellIndex {
    LatLng::new(37.6213, -122.3790)
        .expect("valid lat/lng")
        .to_cell(Resolution::Nine)
}

/// The profile used across the test suite: $10 base covering 2 miles,
/// $0.20/min, $12 floor, no service fee, no tax.
pub fn standard_profile() -> VehicleFareProfile {
    VehicleFareProfile {
        base_fare: dec!(10.00),
        base_miles_included: dec!(2),
        per_minute_rate: dec!(0.20),
        minimum_fare: dec!(12.00),
        service_fee_multiplier: dec!(1.00),
        tax_enabled: false,
        tax_rate: dec!(0),
    }
}

/// Three-band schedule with an unbounded tail: $2.00 / $1.75 / $1.50 per mile.
pub fn standard_schedule() -> TierSchedule {
    TierSchedule::new(vec![
        MileageTier::bounded(dec!(0), dec!(10), dec!(2.00)),
        MileageTier::bounded(dec!(10), dec!(25), dec!(1.75)),
        MileageTier::unbounded(dec!(25), dec!(1.50)),
    ])
    .expect("standard schedule is valid")
}

/// Schedule with no unbounded tail; trips past mile 25 overrun it.
pub fn capped_schedule() -> TierSchedule {
    TierSchedule::new(vec![
        MileageTier::bounded(dec!(0), dec!(10), dec!(2.00)),
        MileageTier::bounded(dec!(10), dec!(25), dec!(1.75)),
    ])
    .expect("capped schedule is valid")
}

/// Three-class demo fleet in display order: sedan, SUV, executive.
pub fn demo_fleet() -> Vec<VehicleTariff> {
    vec![
        VehicleTariff {
            class: VehicleClass {
                id: 1,
                display_name: "Sedan".to_string(),
                slug: "sedan".to_string(),
            },
            profile: standard_profile(),
            schedule: standard_schedule(),
        },
        VehicleTariff {
            class: VehicleClass {
                id: 2,
                display_name: "SUV".to_string(),
                slug: "suv".to_string(),
            },
            profile: standard_profile()
                .with_base_fare(dec!(14.00))
                .with_per_minute_rate(dec!(0.30))
                .with_minimum_fare(dec!(18.00)),
            schedule: TierSchedule::new(vec![
                MileageTier::bounded(dec!(0), dec!(10), dec!(2.60)),
                MileageTier::bounded(dec!(10), dec!(25), dec!(2.20)),
                MileageTier::unbounded(dec!(25), dec!(1.90)),
            ])
            .expect("suv schedule is valid"),
        },
        VehicleTariff {
            class: VehicleClass {
                id: 3,
                display_name: "Executive".to_string(),
                slug: "executive".to_string(),
            },
            profile: standard_profile()
                .with_base_fare(dec!(22.00))
                .with_base_miles_included(dec!(3))
                .with_per_minute_rate(dec!(0.45))
                .with_minimum_fare(dec!(30.00))
                .with_service_fee_multiplier(dec!(1.10))
                .with_tax(dec!(8.875)),
            schedule: TierSchedule::new(vec![
                MileageTier::bounded(dec!(0), dec!(10), dec!(3.80)),
                MileageTier::bounded(dec!(10), dec!(25), dec!(3.20)),
                MileageTier::unbounded(dec!(25), dec!(2.75)),
            ])
            .expect("executive schedule is valid"),
        },
    ]
}
