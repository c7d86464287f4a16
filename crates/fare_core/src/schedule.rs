//! Mileage tier tables: banded per-mile rates.
//!
//! A [`TierSchedule`] is an ordered list of contiguous mileage bands, each
//! with its own per-mile rate. The shape is validated once at construction;
//! the fare calculator then walks the bands read-only:
//!
//! - band 1 starts at mile 0;
//! - every band starts exactly where the previous one ends (no gaps, no
//!   overlaps);
//! - at most one band is unbounded (`to_mile == None`) and it must be last.
//!
//! An empty schedule is valid: any distance beyond the profile's included
//! miles then surfaces as a coverage gap at calculation time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One band of a per-vehicle mileage schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageTier {
    pub from_mile: Decimal,
    /// `None` marks the unbounded terminal band.
    pub to_mile: Option<Decimal>,
    pub per_mile_rate: Decimal,
}

impl MileageTier {
    pub fn bounded(from_mile: Decimal, to_mile: Decimal, per_mile_rate: Decimal) -> Self {
        Self {
            from_mile,
            to_mile: Some(to_mile),
            per_mile_rate,
        }
    }

    pub fn unbounded(from_mile: Decimal, per_mile_rate: Decimal) -> Self {
        Self {
            from_mile,
            to_mile: None,
            per_mile_rate,
        }
    }
}

/// Validated, ordered mileage tier table for one vehicle class.
///
/// Configured once (admin or seed data), read-only during fare computation.
/// Deserialization goes through the same validation as [`TierSchedule::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MileageTier>", into = "Vec<MileageTier>")]
pub struct TierSchedule {
    tiers: Vec<MileageTier>,
}

impl TierSchedule {
    pub fn new(tiers: Vec<MileageTier>) -> Result<Self, ScheduleError> {
        for (i, tier) in tiers.iter().enumerate() {
            let index = i + 1;
            if tier.per_mile_rate < Decimal::ZERO {
                return Err(ScheduleError::NegativeRate {
                    index,
                    rate: tier.per_mile_rate,
                });
            }
            if i == 0 {
                if tier.from_mile != Decimal::ZERO {
                    return Err(ScheduleError::NonZeroStart(tier.from_mile));
                }
            } else {
                // An unbounded band before this one was already rejected, so
                // the previous band always has an end.
                let expected = tiers[i - 1].to_mile.unwrap_or(tier.from_mile);
                if tier.from_mile != expected {
                    return Err(ScheduleError::NotContiguous {
                        index,
                        from_mile: tier.from_mile,
                        expected,
                    });
                }
            }
            match tier.to_mile {
                Some(to_mile) if to_mile <= tier.from_mile => {
                    return Err(ScheduleError::EmptyBand {
                        index,
                        from_mile: tier.from_mile,
                        to_mile,
                    });
                }
                Some(_) => {}
                None => {
                    if index != tiers.len() {
                        return Err(ScheduleError::UnboundedNotLast { index });
                    }
                }
            }
        }
        Ok(Self { tiers })
    }

    pub fn empty() -> Self {
        Self { tiers: Vec::new() }
    }

    pub fn tiers(&self) -> &[MileageTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Whether the last band is unbounded, i.e. the schedule can bill any
    /// distance without a coverage gap.
    pub fn has_unbounded_tail(&self) -> bool {
        matches!(
            self.tiers.last(),
            Some(MileageTier { to_mile: None, .. })
        )
    }
}

impl TryFrom<Vec<MileageTier>> for TierSchedule {
    type Error = ScheduleError;

    fn try_from(tiers: Vec<MileageTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierSchedule> for Vec<MileageTier> {
    fn from(schedule: TierSchedule) -> Self {
        schedule.tiers
    }
}

/// Shape violations in a tier table. `index` is the 1-based band position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("band 1 must start at mile 0, got {0}")]
    NonZeroStart(Decimal),
    #[error("band {index} has non-positive width ({from_mile} to {to_mile})")]
    EmptyBand {
        index: usize,
        from_mile: Decimal,
        to_mile: Decimal,
    },
    #[error("band {index} has a negative per-mile rate ({rate})")]
    NegativeRate { index: usize, rate: Decimal },
    #[error("band {index} starts at mile {from_mile} but the previous band ends at {expected}")]
    NotContiguous {
        index: usize,
        from_mile: Decimal,
        expected: Decimal,
    },
    #[error("band {index} is unbounded but is not the last band")]
    UnboundedNotLast { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn three_bands() -> Vec<MileageTier> {
        vec![
            MileageTier::bounded(dec!(0), dec!(10), dec!(2.00)),
            MileageTier::bounded(dec!(10), dec!(25), dec!(1.75)),
            MileageTier::unbounded(dec!(25), dec!(1.50)),
        ]
    }

    #[test]
    fn contiguous_schedule_is_accepted() {
        let schedule = TierSchedule::new(three_bands()).expect("valid schedule");
        assert_eq!(schedule.len(), 3);
        assert!(schedule.has_unbounded_tail());
    }

    #[test]
    fn empty_schedule_is_accepted() {
        let schedule = TierSchedule::empty();
        assert!(schedule.is_empty());
        assert!(!schedule.has_unbounded_tail());
    }

    #[test]
    fn gap_between_bands_is_rejected() {
        let result = TierSchedule::new(vec![
            MileageTier::bounded(dec!(0), dec!(10), dec!(2.00)),
            MileageTier::bounded(dec!(12), dec!(25), dec!(1.75)),
        ]);
        assert_eq!(
            result,
            Err(ScheduleError::NotContiguous {
                index: 2,
                from_mile: dec!(12),
                expected: dec!(10),
            })
        );
    }

    #[test]
    fn overlapping_bands_are_rejected() {
        let result = TierSchedule::new(vec![
            MileageTier::bounded(dec!(0), dec!(10), dec!(2.00)),
            MileageTier::bounded(dec!(8), dec!(25), dec!(1.75)),
        ]);
        assert!(matches!(
            result,
            Err(ScheduleError::NotContiguous { index: 2, .. })
        ));
    }

    #[test]
    fn unbounded_band_must_be_last() {
        let result = TierSchedule::new(vec![
            MileageTier::unbounded(dec!(0), dec!(2.00)),
            MileageTier::bounded(dec!(10), dec!(25), dec!(1.75)),
        ]);
        assert_eq!(result, Err(ScheduleError::UnboundedNotLast { index: 1 }));
    }

    #[test]
    fn first_band_must_start_at_zero() {
        let result = TierSchedule::new(vec![MileageTier::bounded(dec!(2), dec!(10), dec!(2.00))]);
        assert_eq!(result, Err(ScheduleError::NonZeroStart(dec!(2))));
    }

    #[test]
    fn zero_width_band_is_rejected() {
        let result = TierSchedule::new(vec![MileageTier::bounded(dec!(0), dec!(0), dec!(2.00))]);
        assert!(matches!(result, Err(ScheduleError::EmptyBand { index: 1, .. })));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let result = TierSchedule::new(vec![MileageTier::bounded(dec!(0), dec!(10), dec!(-0.50))]);
        assert_eq!(
            result,
            Err(ScheduleError::NegativeRate {
                index: 1,
                rate: dec!(-0.50),
            })
        );
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let valid = r#"[
            {"from_mile": "0", "to_mile": "10", "per_mile_rate": "2.00"},
            {"from_mile": "10", "to_mile": null, "per_mile_rate": "1.50"}
        ]"#;
        let schedule: TierSchedule = serde_json::from_str(valid).expect("valid schedule json");
        assert_eq!(schedule.len(), 2);

        let with_gap = r#"[
            {"from_mile": "0", "to_mile": "10", "per_mile_rate": "2.00"},
            {"from_mile": "15", "to_mile": null, "per_mile_rate": "1.50"}
        ]"#;
        assert!(serde_json::from_str::<TierSchedule>(with_gap).is_err());
    }
}
