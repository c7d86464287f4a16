//! Fare calculation: tiered per-mile pricing with an itemized breakdown.
//!
//! The computation is pure and deterministic:
//!
//! 1. **Base fare** covering the first `base_miles_included` miles.
//! 2. **Tiered distance billing**: a mile cursor starts at the included miles
//!    and walks the schedule bands in ascending order; each band bills the
//!    miles it covers at its own rate.
//! 3. **Time charge** over the full trip duration.
//! 4. **Service fee** on the pre-fee subtotal, folded into the subtotal line;
//!    the emitted `subtotal` line carries the post-fee value.
//! 5. **Tax** on the subtotal; `total = subtotal + tax`.
//! 6. **Minimum-fare floor**, emitted as an explicit adjustment line.
//!
//! Every line amount is rounded to cents when the line is emitted. Billable
//! distance the schedule cannot cover is an error, never a silent discount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::breakdown::{round_money, FareBreakdown, FareLine, LineKey};
use crate::profile::{ProfileError, VehicleFareProfile};
use crate::schedule::TierSchedule;

const SECONDS_PER_MINUTE: Decimal = dec!(60);
const PERCENT: Decimal = dec!(100);

/// Errors from the fare calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FareError {
    #[error("trip distance must be non-negative, got {0} mi")]
    NegativeDistance(Decimal),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("tier schedule leaves {unbilled_miles} of {billable_miles} billable mi uncovered")]
    CoverageGap {
        billable_miles: Decimal,
        unbilled_miles: Decimal,
    },
}

/// Compute the itemized fare for one trip under one vehicle tariff.
///
/// `distance_miles` and `duration_seconds` come from the routing collaborator
/// (see [`crate::routing`]); profile and schedule are the vehicle class
/// configuration. The same inputs always produce the same breakdown.
pub fn calculate_fare(
    distance_miles: Decimal,
    duration_seconds: u64,
    profile: &VehicleFareProfile,
    schedule: &TierSchedule,
) -> Result<FareBreakdown, FareError> {
    if distance_miles < Decimal::ZERO {
        return Err(FareError::NegativeDistance(distance_miles));
    }
    profile.validate()?;

    let mut lines = Vec::new();

    lines.push(FareLine::new(
        LineKey::BaseFare,
        base_fare_label(profile),
        profile.base_fare,
    ));

    if distance_miles > profile.base_miles_included {
        let billable_miles = distance_miles - profile.base_miles_included;
        let mut remaining = billable_miles;
        // Absolute-mile cursor: the included miles consume band capacity too.
        let mut cursor = profile.base_miles_included;
        let mut emitted = 0u32;

        for tier in schedule.tiers() {
            if remaining <= Decimal::ZERO {
                break;
            }
            let start = cursor.max(tier.from_mile);
            let width = match tier.to_mile {
                Some(to_mile) => {
                    if start >= to_mile {
                        // Band fully consumed by the included miles.
                        continue;
                    }
                    to_mile - start
                }
                None => remaining,
            };
            let miles_in_tier = width.min(remaining);
            emitted += 1;
            lines.push(FareLine::new(
                LineKey::Tier(emitted),
                tier_label(start, miles_in_tier, tier.per_mile_rate),
                miles_in_tier * tier.per_mile_rate,
            ));
            cursor = start + miles_in_tier;
            remaining -= miles_in_tier;
        }

        if remaining > Decimal::ZERO {
            return Err(FareError::CoverageGap {
                billable_miles,
                unbilled_miles: remaining,
            });
        }
    }

    let minutes = Decimal::from(duration_seconds) / SECONDS_PER_MINUTE;
    let time_charge = round_money(minutes * profile.per_minute_rate);
    if time_charge > Decimal::ZERO {
        lines.push(FareLine::new(
            LineKey::TimeCharge,
            time_label(minutes, profile.per_minute_rate),
            time_charge,
        ));
    }

    let mut subtotal: Decimal = lines.iter().map(|line| line.amount).sum();

    if profile.service_fee_multiplier != Decimal::ONE {
        let fee = round_money(subtotal * (profile.service_fee_multiplier - Decimal::ONE));
        lines.push(FareLine::new(
            LineKey::ServiceFee,
            service_fee_label(profile),
            fee,
        ));
        subtotal += fee;
    }

    lines.push(FareLine::subtotal("Subtotal", subtotal));

    let mut total = subtotal;
    if profile.tax_enabled && profile.tax_rate > Decimal::ZERO {
        let tax = round_money(subtotal * profile.tax_rate / PERCENT);
        lines.push(FareLine::new(LineKey::Tax, tax_label(profile), tax));
        total += tax;
    }

    if total < profile.minimum_fare {
        let adjustment = profile.minimum_fare - total;
        lines.push(FareLine::new(
            LineKey::MinimumFare,
            "Minimum fare adjustment",
            adjustment,
        ));
        total = profile.minimum_fare;
    }

    lines.push(FareLine::new(LineKey::Total, "Total", total));

    Ok(FareBreakdown::new(lines, total))
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

fn base_fare_label(profile: &VehicleFareProfile) -> String {
    if profile.base_miles_included > Decimal::ZERO {
        format!(
            "Base fare (first {} mi included)",
            profile.base_miles_included.normalize()
        )
    } else {
        "Base fare".to_string()
    }
}

fn tier_label(start: Decimal, miles: Decimal, rate: Decimal) -> String {
    format!(
        "Miles {} to {} ({} mi @ ${:.2}/mi)",
        start.normalize(),
        (start + miles).normalize(),
        miles.normalize(),
        rate
    )
}

fn time_label(minutes: Decimal, rate: Decimal) -> String {
    format!(
        "Time ({} min @ ${:.2}/min)",
        minutes.round_dp(1).normalize(),
        rate
    )
}

fn service_fee_label(profile: &VehicleFareProfile) -> String {
    let percent = (profile.service_fee_multiplier - Decimal::ONE) * PERCENT;
    format!("Service fee ({}%)", percent.normalize())
}

fn tax_label(profile: &VehicleFareProfile) -> String {
    format!("Tax ({}%)", profile.tax_rate.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::MileageTier;

    fn flat_profile() -> VehicleFareProfile {
        VehicleFareProfile {
            base_fare: dec!(10.00),
            base_miles_included: dec!(2),
            per_minute_rate: Decimal::ZERO,
            minimum_fare: Decimal::ZERO,
            service_fee_multiplier: Decimal::ONE,
            tax_enabled: false,
            tax_rate: Decimal::ZERO,
        }
    }

    fn single_band() -> TierSchedule {
        TierSchedule::new(vec![MileageTier::bounded(dec!(0), dec!(10), dec!(2.00))])
            .expect("valid schedule")
    }

    #[test]
    fn trip_within_included_miles_bills_base_only() {
        let breakdown =
            calculate_fare(dec!(1.5), 0, &flat_profile(), &single_band()).expect("fare");
        assert!(breakdown.tier_lines().next().is_none());
        assert_eq!(breakdown.total(), dec!(10.00));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let result = calculate_fare(dec!(-1), 0, &flat_profile(), &single_band());
        assert_eq!(result, Err(FareError::NegativeDistance(dec!(-1))));
    }

    #[test]
    fn invalid_profile_is_rejected_before_any_line_is_built() {
        let profile = flat_profile().with_service_fee_multiplier(dec!(0.5));
        let result = calculate_fare(dec!(5), 0, &profile, &single_band());
        assert_eq!(
            result,
            Err(FareError::Profile(ProfileError::MultiplierBelowOne(dec!(
                0.5
            ))))
        );
    }

    #[test]
    fn empty_schedule_with_billable_distance_is_a_coverage_gap() {
        let result = calculate_fare(dec!(5), 0, &flat_profile(), &TierSchedule::empty());
        assert_eq!(
            result,
            Err(FareError::CoverageGap {
                billable_miles: dec!(3),
                unbilled_miles: dec!(3),
            })
        );
    }

    #[test]
    fn band_consumed_by_included_miles_emits_no_line_and_no_number() {
        // 12 included miles swallow the whole first band; the 10-25 band
        // becomes tier_1.
        let profile = flat_profile().with_base_miles_included(dec!(12));
        let schedule = TierSchedule::new(vec![
            MileageTier::bounded(dec!(0), dec!(10), dec!(2.00)),
            MileageTier::bounded(dec!(10), dec!(25), dec!(1.75)),
        ])
        .expect("valid schedule");

        let breakdown = calculate_fare(dec!(20), 0, &profile, &schedule).expect("fare");
        let tiers: Vec<_> = breakdown.tier_lines().collect();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].key, LineKey::Tier(1));
        assert_eq!(tiers[0].amount, dec!(14.00)); // 8 mi @ $1.75
    }

    #[test]
    fn time_charge_line_is_omitted_when_zero() {
        let breakdown = calculate_fare(dec!(1), 0, &flat_profile(), &single_band()).expect("fare");
        assert!(breakdown.line(LineKey::TimeCharge).is_none());
    }

    #[test]
    fn labels_carry_the_computed_quantities() {
        let profile = flat_profile().with_per_minute_rate(dec!(0.20));
        let breakdown = calculate_fare(dec!(5), 600, &profile, &single_band()).expect("fare");

        let base = breakdown.line(LineKey::BaseFare).expect("base line");
        assert_eq!(base.label, "Base fare (first 2 mi included)");

        let tier = breakdown.line(LineKey::Tier(1)).expect("tier line");
        assert_eq!(tier.label, "Miles 2 to 5 (3 mi @ $2.00/mi)");

        let time = breakdown.line(LineKey::TimeCharge).expect("time line");
        assert_eq!(time.label, "Time (10 min @ $0.20/min)");
    }
}
