//! Decimal money amounts.
//!
//! Reimbursement amounts travel the wire as plain JSON numbers positionally
//! aligned with their expense-type labels. `Money` wraps [`Decimal`] so sums
//! and comparisons are exact - `0.1 + 0.2` style float drift would show up
//! directly in approval totals.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An exact monetary amount in the company's currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from a value in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_is_exact() {
        // 100.50 + 49.50 must be exactly 150.00
        let total: Money = [Money::from_cents(10050), Money::from_cents(4950)]
            .iter()
            .sum();
        assert_eq!(total, Money::from_cents(15000));
        assert_eq!(total.to_string(), "$150.00");
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(120000).to_string(), "$1200.00");
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let m: Money = serde_json::from_str("100.5").unwrap();
        assert_eq!(m, Money::from_cents(10050));
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Money = core::iter::empty::<Money>().sum();
        assert_eq!(total, Money::ZERO);
    }

    #[test]
    fn test_ordering() {
        assert!(Money::from_cents(100) < Money::from_cents(101));
    }
}
