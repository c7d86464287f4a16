//! Route estimation seam: the collaborator that supplies trip distance and
//! duration.
//!
//! The fare engine never talks to a routing service itself. Callers hand it a
//! [`RouteEstimate`]; the [`RouteEstimator`] trait is where the surrounding
//! booking system plugs in its routing backend. One in-process implementation
//! ships here:
//!
//! - **`StraightLineEstimator`**: Haversine distance between H3 cells scaled
//!   by a road circuity factor, duration from an assumed average speed. Zero
//!   network dependencies; cell-pair distances are memoized in a global LRU
//!   cache.

use std::num::NonZeroUsize;
use std::sync::{Mutex, OnceLock};

use h3o::CellIndex;
use lru::LruCache;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Earth mean radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Default assumed door-to-door average speed (mph).
const DEFAULT_SPEED_MPH: f64 = 25.0;

/// Default road circuity factor applied to straight-line distance.
const DEFAULT_CIRCUITY_FACTOR: f64 = 1.3;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Result of a route query: exactly what the fare calculator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub distance_miles: Decimal,
    pub duration_seconds: u64,
}

/// Trait for routing backends. Implementations must be `Send + Sync` so one
/// estimator can serve concurrent quote requests.
pub trait RouteEstimator: Send + Sync {
    /// Estimate the route between two H3 cells. `None` if no estimate exists.
    fn estimate(&self, from: CellIndex, to: CellIndex) -> Option<RouteEstimate>;
}

/// Uncached Haversine distance (internal use).
fn miles_between_cells_uncached(a: CellIndex, b: CellIndex) -> f64 {
    let a: h3o::LatLng = a.into();
    let b: h3o::LatLng = b.into();
    let (lat1, lon1) = (a.lat().to_radians(), a.lng().to_radians());
    let (lat2, lon2) = (b.lat().to_radians(), b.lng().to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Global cell-pair distance cache (50,000 entries).
fn distance_cache() -> &'static Mutex<LruCache<(CellIndex, CellIndex), f64>> {
    static CACHE: OnceLock<Mutex<LruCache<(CellIndex, CellIndex), f64>>> = OnceLock::new();
    CACHE.get_or_init(|| {
        Mutex::new(LruCache::new(
            NonZeroUsize::new(50_000).expect("cache size must be non-zero"),
        ))
    })
}

/// Haversine distance in miles between two H3 cells, memoized per cell pair.
pub fn miles_between_cells(a: CellIndex, b: CellIndex) -> f64 {
    let key = if a < b { (a, b) } else { (b, a) };
    let mut cache = match distance_cache().lock() {
        Ok(guard) => guard,
        Err(_) => return miles_between_cells_uncached(a, b), // Fallback: compute without cache if mutex poisoned
    };
    *cache.get_or_insert(key, || miles_between_cells_uncached(a, b))
}

/// Straight-line estimator: Haversine distance scaled by a circuity factor,
/// duration from a constant assumed speed.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineEstimator {
    pub speed_mph: f64,
    pub circuity_factor: f64,
}

impl Default for StraightLineEstimator {
    fn default() -> Self {
        Self {
            speed_mph: DEFAULT_SPEED_MPH,
            circuity_factor: DEFAULT_CIRCUITY_FACTOR,
        }
    }
}

impl StraightLineEstimator {
    pub fn with_speed_mph(mut self, speed_mph: f64) -> Self {
        self.speed_mph = speed_mph;
        self
    }

    pub fn with_circuity_factor(mut self, circuity_factor: f64) -> Self {
        self.circuity_factor = circuity_factor;
        self
    }
}

impl RouteEstimator for StraightLineEstimator {
    fn estimate(&self, from: CellIndex, to: CellIndex) -> Option<RouteEstimate> {
        if self.speed_mph <= 0.0 || self.circuity_factor <= 0.0 {
            return None;
        }
        let road_miles = miles_between_cells(from, to) * self.circuity_factor;
        let duration_seconds = (road_miles / self.speed_mph * SECONDS_PER_HOUR).round() as u64;
        let distance_miles = Decimal::from_f64(road_miles)?.round_dp(2);
        Some(RouteEstimate {
            distance_miles,
            duration_seconds,
        })
    }
}
