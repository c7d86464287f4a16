//! Itemized fare breakdown: typed line keys, lines, and money rounding.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Round a monetary amount to cents, midpoint away from zero.
///
/// Rounding happens at the point each line is emitted, not at the end of the
/// computation, so summing the emitted lines can differ from an unrounded
/// reference by a cent. Charged amounts follow the lines.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Typed key of one breakdown line. Renders in snake_case string form
/// (`base_fare`, `tier_2`, ...) for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKey {
    BaseFare,
    /// Numbered by emission order: `tier_1` is the first band that bills miles.
    Tier(u32),
    TimeCharge,
    ServiceFee,
    Subtotal,
    Tax,
    MinimumFare,
    Total,
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKey::BaseFare => write!(f, "base_fare"),
            LineKey::Tier(n) => write!(f, "tier_{n}"),
            LineKey::TimeCharge => write!(f, "time_charge"),
            LineKey::ServiceFee => write!(f, "service_fee"),
            LineKey::Subtotal => write!(f, "subtotal"),
            LineKey::Tax => write!(f, "tax"),
            LineKey::MinimumFare => write!(f, "minimum_fare"),
            LineKey::Total => write!(f, "total"),
        }
    }
}

impl Serialize for LineKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One itemized row of a fare quote, labeled for customer display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareLine {
    pub key: LineKey,
    pub label: String,
    pub amount: Decimal,
    /// Marks the running-subtotal line.
    pub is_subtotal: bool,
}

impl FareLine {
    /// Amounts are rounded to cents at construction; lines never carry sub-cent values.
    pub(crate) fn new(key: LineKey, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            key,
            label: label.into(),
            amount: round_money(amount),
            is_subtotal: false,
        }
    }

    pub(crate) fn subtotal(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            key: LineKey::Subtotal,
            label: label.into(),
            amount: round_money(amount),
            is_subtotal: true,
        }
    }
}

/// A complete itemized fare: ordered lines plus the total actually charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareBreakdown {
    lines: Vec<FareLine>,
    total: Decimal,
}

impl FareBreakdown {
    pub(crate) fn new(lines: Vec<FareLine>, total: Decimal) -> Self {
        Self { lines, total }
    }

    pub fn lines(&self) -> &[FareLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn line(&self, key: LineKey) -> Option<&FareLine> {
        self.lines.iter().find(|line| line.key == key)
    }

    pub fn amount(&self, key: LineKey) -> Option<Decimal> {
        self.line(key).map(|line| line.amount)
    }

    /// The distance-billing lines, in emission (ascending mileage) order.
    pub fn tier_lines(&self) -> impl Iterator<Item = &FareLine> {
        self.lines
            .iter()
            .filter(|line| matches!(line.key, LineKey::Tier(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keys_render_in_snake_case() {
        assert_eq!(LineKey::BaseFare.to_string(), "base_fare");
        assert_eq!(LineKey::Tier(3).to_string(), "tier_3");
        assert_eq!(LineKey::TimeCharge.to_string(), "time_charge");
        assert_eq!(LineKey::MinimumFare.to_string(), "minimum_fare");
    }

    #[test]
    fn rounding_is_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(2.005)), dec!(2.01));
        assert_eq!(round_money(dec!(2.004)), dec!(2.00));
        assert_eq!(round_money(dec!(-2.005)), dec!(-2.01));
    }

    #[test]
    fn lines_are_rounded_on_emission() {
        let line = FareLine::new(LineKey::TimeCharge, "Time", dec!(1.999));
        assert_eq!(line.amount, dec!(2.00));
        assert!(!line.is_subtotal);

        let subtotal = FareLine::subtotal("Subtotal", dec!(18.004));
        assert_eq!(subtotal.amount, dec!(18.00));
        assert!(subtotal.is_subtotal);
    }
}
