//! Multi-vehicle quoting: one itemized fare per vehicle class for a route.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::breakdown::FareBreakdown;
use crate::pricing::{calculate_fare, FareError};
use crate::profile::VehicleFareProfile;
use crate::routing::RouteEstimate;
use crate::schedule::TierSchedule;

/// Identity of one bookable vehicle class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleClass {
    pub id: u32,
    pub display_name: String,
    pub slug: String,
}

/// Full tariff for one vehicle class: identity, fare profile, tier schedule.
///
/// The surrounding booking system supplies tariffs pre-filtered to active
/// classes and pre-ordered by its display sort key; quoting preserves that
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleTariff {
    pub class: VehicleClass,
    pub profile: VehicleFareProfile,
    pub schedule: TierSchedule,
}

/// One vehicle's full price result for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub vehicle_type_id: u32,
    pub display_name: String,
    pub slug: String,
    pub estimated_fare: Decimal,
    pub breakdown: FareBreakdown,
}

/// A tariff that failed to quote, with the error that stopped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFailure {
    pub vehicle_type_id: u32,
    pub slug: String,
    pub error: FareError,
}

/// Result of quoting a whole fleet: successes in input order plus any
/// isolated failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
    pub failures: Vec<QuoteFailure>,
}

impl QuoteBatch {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Quote every tariff for one route estimate.
///
/// Output order matches input order; no quote is omitted for fare magnitude.
/// A tariff that fails (malformed profile, schedule coverage gap) lands in
/// [`QuoteBatch::failures`] instead of aborting the remaining vehicles.
pub fn build_quotes(estimate: &RouteEstimate, tariffs: &[VehicleTariff]) -> QuoteBatch {
    let mut batch = QuoteBatch::default();
    for tariff in tariffs {
        match calculate_fare(
            estimate.distance_miles,
            estimate.duration_seconds,
            &tariff.profile,
            &tariff.schedule,
        ) {
            Ok(breakdown) => batch.quotes.push(Quote {
                vehicle_type_id: tariff.class.id,
                display_name: tariff.class.display_name.clone(),
                slug: tariff.class.slug.clone(),
                estimated_fare: breakdown.total(),
                breakdown,
            }),
            Err(error) => {
                warn!(vehicle = %tariff.class.slug, %error, "vehicle quote failed; skipping");
                batch.failures.push(QuoteFailure {
                    vehicle_type_id: tariff.class.id,
                    slug: tariff.class.slug.clone(),
                    error,
                });
            }
        }
    }
    batch
}
