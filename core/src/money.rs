//! Money amounts in integer centavos.
//!
//! Prices and totals are stored as whole centavos to avoid floating point
//! drift in amounts that are summed and compared for equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Money amount in centavos.
///
/// Serialized as a bare integer (centavos), which is what the collection
/// store persists.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from centavos.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole pesos.
    #[must_use]
    pub const fn from_pesos(pesos: i64) -> Self {
        Self(pesos * 100)
    }

    /// Returns the value in centavos.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is negative.
    ///
    /// Stored prices must never be negative; submission validation uses this
    /// rather than rejecting at construction so drafts can hold whatever the
    /// operator typed.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies the amount by a quantity.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Formats as `₱1,234.56` (thousands-grouped pesos, two decimals).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let pesos = abs / 100;
        let centavos = abs % 100;

        let digits = pesos.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{sign}\u{20b1}{grouped}.{centavos:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pesos_is_hundred_cents() {
        assert_eq!(Money::from_pesos(12).cents(), 1200);
    }

    #[test]
    fn times_scales_by_quantity() {
        assert_eq!(Money::from_pesos(10).times(3), Money::from_pesos(30));
    }

    #[test]
    fn sum_of_amounts() {
        let total: Money = [Money::from_cents(150), Money::from_cents(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_pesos(2));
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::from_cents(123_456_789).to_string(), "₱1,234,567.89");
        assert_eq!(Money::from_cents(50).to_string(), "₱0.50");
        assert_eq!(Money::from_cents(-1500).to_string(), "-₱15.00");
    }

    #[test]
    fn serializes_as_bare_cents() {
        #[allow(clippy::unwrap_used)] // serialization of a plain integer cannot fail
        let json = serde_json::to_string(&Money::from_cents(995)).unwrap();
        assert_eq!(json, "995");
    }
}
