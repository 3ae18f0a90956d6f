use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// number of decimal places kept on every money value
pub const MONEY_DP: u32 = 2;

/// Money type in whole currency units, kept at 2 decimal places
///
/// Deserialization goes through `from_decimal`, so loaded values carry the
/// same scale as computed ones and sums stay independent of input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(from = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    fn rounded(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_DP))
    }

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Self::rounded(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Self::rounded(Decimal::from_str(s)?))
    }

    /// create from whole currency units (rupees, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly above zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly below zero; negative zero does not count
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// subtract, flooring the result at zero
    pub fn saturating_sub(self, other: Self) -> Self {
        (self - other).max(Money::ZERO)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::rounded(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::rounded(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        *self = *self - other;
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money::rounded(self.0 * other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.126").unwrap();
        assert_eq!(m.to_string(), "100.13"); // rounded to 2 places
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let due = Money::from_major(300);
        assert_eq!(due.saturating_sub(Money::from_major(500)), Money::ZERO);
        assert_eq!(due.saturating_sub(Money::from_major(100)), Money::from_major(200));
    }

    #[test]
    fn test_sum_and_scaling() {
        let parts = [Money::from_major(4000), Money::from_major(3000), Money::from_major(1000)];
        let total: Money = parts.iter().sum();
        assert_eq!(total, Money::from_major(8000));

        let per_day = Money::from_decimal(dec!(12.5));
        assert_eq!(per_day * dec!(4), Money::from_major(50));
    }

    #[test]
    fn test_deserialize_rounds_like_from_decimal() {
        let loaded: Money = serde_json::from_str("\"0.005\"").unwrap();
        assert_eq!(loaded, Money::from_decimal(dec!(0.005)));
        assert!(loaded.as_decimal().scale() <= MONEY_DP);

        let a: Money = serde_json::from_str("\"0.01\"").unwrap();
        assert_eq!(a + loaded, loaded + a);
    }

    #[test]
    fn test_negative_detection() {
        assert!(Money::from_major(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_major(1).is_negative());
        assert!(Money::from_major(1).is_positive());
        assert!(!Money::ZERO.is_positive());
    }
}
