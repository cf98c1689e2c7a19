//! Precision-safe decimal types for order pricing and sizing.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors critical in financial calculations.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// Price with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// prices with quantities in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Compute the sell price from a best bid and a configured coefficient.
    ///
    /// `round(best_bid * coefficient, decimals)` with midpoint-nearest-even
    /// rounding, matching the behavior the exchange-facing tooling expects.
    #[inline]
    pub fn from_best_bid(best_bid: Price, coefficient: Decimal, decimals: u32) -> Self {
        Self((best_bid.0 * coefficient).round_dp(decimals))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Quantity (order size or balance) with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub Decimal);

impl Quantity {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Floor to whole units. Balances are tracked in whole tokens;
    /// the fractional remainder below one unit is never accounted for.
    #[inline]
    pub fn floor_units(&self) -> Self {
        Self(self.0.floor())
    }

    /// Floor to `decimals` places, never rounding up past the available
    /// amount. Used to satisfy exchange lot-size constraints.
    #[inline]
    pub fn floor_to(&self, decimals: u32) -> Self {
        Self(self.0.round_dp_with_strategy(decimals, RoundingStrategy::ToZero))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Quantity {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sell_price_from_best_bid() {
        let bid = Price::new(dec!(1.0));
        let price = Price::from_best_bid(bid, dec!(1.01), 3);
        assert_eq!(price.inner(), dec!(1.010));
    }

    #[test]
    fn test_sell_price_rounds_to_three_places() {
        let bid = Price::new(dec!(0.12345));
        let price = Price::from_best_bid(bid, dec!(1.05), 3);
        // 0.12345 * 1.05 = 0.1296225
        assert_eq!(price.inner(), dec!(0.130));
    }

    #[test]
    fn test_sell_price_midpoint_rounds_to_even() {
        let bid = Price::new(dec!(0.0025));
        let price = Price::from_best_bid(bid, dec!(1), 3);
        assert_eq!(price.inner(), dec!(0.002));
    }

    #[test]
    fn test_quantity_floor_units() {
        assert_eq!(Quantity::new(dec!(100.987)).floor_units().inner(), dec!(100));
        assert_eq!(Quantity::new(dec!(0.4)).floor_units().inner(), dec!(0));
    }

    #[test]
    fn test_quantity_floor_to_lot_decimals() {
        let qty = Quantity::new(dec!(100.456));
        assert_eq!(qty.floor_to(2).inner(), dec!(100.45));
    }

    #[test]
    fn test_quantity_floor_never_exceeds_available() {
        let qty = Quantity::new(dec!(99.999));
        assert!(qty.floor_to(2).inner() <= qty.inner());
        assert_eq!(qty.floor_to(2).inner(), dec!(99.99));
    }
}
