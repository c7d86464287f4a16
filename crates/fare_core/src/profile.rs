//! Per-vehicle-class fare configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Immutable fare configuration for one vehicle class.
///
/// All monetary and mileage quantities are decimals. A profile is validated at
/// the fare-calculation boundary rather than at construction, so callers can
/// assemble one field by field or deserialize it straight from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFareProfile {
    /// Flat charge covering the first `base_miles_included` miles.
    pub base_fare: Decimal,
    /// Miles covered by the base fare before tiered per-mile billing begins.
    pub base_miles_included: Decimal,
    /// Charge per minute of trip duration, applied to the full duration.
    pub per_minute_rate: Decimal,
    /// Floor below which the computed fare is not allowed to fall.
    pub minimum_fare: Decimal,
    /// 1.00 = no fee; 1.10 adds a 10% service fee on the pre-fee subtotal.
    pub service_fee_multiplier: Decimal,
    pub tax_enabled: bool,
    /// Percentage, e.g. 8.875 means 8.875%.
    pub tax_rate: Decimal,
}

impl Default for VehicleFareProfile {
    fn default() -> Self {
        Self {
            base_fare: dec!(10.00),
            base_miles_included: dec!(2),
            per_minute_rate: dec!(0.20),
            minimum_fare: dec!(12.00),
            service_fee_multiplier: dec!(1.00),
            tax_enabled: false,
            tax_rate: Decimal::ZERO,
        }
    }
}

impl VehicleFareProfile {
    pub fn with_base_fare(mut self, base_fare: Decimal) -> Self {
        self.base_fare = base_fare;
        self
    }

    pub fn with_base_miles_included(mut self, base_miles_included: Decimal) -> Self {
        self.base_miles_included = base_miles_included;
        self
    }

    pub fn with_per_minute_rate(mut self, per_minute_rate: Decimal) -> Self {
        self.per_minute_rate = per_minute_rate;
        self
    }

    pub fn with_minimum_fare(mut self, minimum_fare: Decimal) -> Self {
        self.minimum_fare = minimum_fare;
        self
    }

    pub fn with_service_fee_multiplier(mut self, service_fee_multiplier: Decimal) -> Self {
        self.service_fee_multiplier = service_fee_multiplier;
        self
    }

    /// Enable tax at the given percentage rate.
    pub fn with_tax(mut self, tax_rate: Decimal) -> Self {
        self.tax_enabled = true;
        self.tax_rate = tax_rate;
        self
    }

    /// Check the profile invariants. Called by the fare calculator before any
    /// arithmetic; a profile that fails here never produces a partial breakdown.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.base_fare < Decimal::ZERO {
            return Err(ProfileError::NegativeBaseFare(self.base_fare));
        }
        if self.base_miles_included < Decimal::ZERO {
            return Err(ProfileError::NegativeIncludedMiles(self.base_miles_included));
        }
        if self.per_minute_rate < Decimal::ZERO {
            return Err(ProfileError::NegativePerMinuteRate(self.per_minute_rate));
        }
        if self.minimum_fare < Decimal::ZERO {
            return Err(ProfileError::NegativeMinimumFare(self.minimum_fare));
        }
        if self.service_fee_multiplier < Decimal::ONE {
            return Err(ProfileError::MultiplierBelowOne(self.service_fee_multiplier));
        }
        if self.tax_rate < Decimal::ZERO {
            return Err(ProfileError::NegativeTaxRate(self.tax_rate));
        }
        Ok(())
    }
}

/// Invariant violations in a [`VehicleFareProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("base fare must be non-negative, got {0}")]
    NegativeBaseFare(Decimal),
    #[error("included miles must be non-negative, got {0}")]
    NegativeIncludedMiles(Decimal),
    #[error("per-minute rate must be non-negative, got {0}")]
    NegativePerMinuteRate(Decimal),
    #[error("minimum fare must be non-negative, got {0}")]
    NegativeMinimumFare(Decimal),
    #[error("service fee multiplier must be at least 1, got {0}")]
    MultiplierBelowOne(Decimal),
    #[error("tax rate must be non-negative, got {0}")]
    NegativeTaxRate(Decimal),
}
