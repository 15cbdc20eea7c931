//! [`Money`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

/// Amount of money in yuan.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Currency sign prepended when displaying [`Money`].
    pub const SIGN: char = '¥';

    /// Creates a new [`Money`] of the provided `amount`.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds this [`Money`] to cents, half away from zero.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(self.0.round_dp_with_strategy(
            2,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Returns the mean of the provided amounts, or [`None`] if there are
    /// none.
    #[must_use]
    pub fn mean(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        let (sum, count) = amounts
            .into_iter()
            .fold((Self::ZERO, 0_u32), |(sum, n), m| (sum + m, n + 1));
        (count > 0).then(|| Self(sum.0 / Decimal::from(count)))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Self::SIGN, self.round_to_cents().0)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(Self::SIGN).unwrap_or(s).trim_start();
        if s.is_empty() {
            return Err("empty amount");
        }
        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::new(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("3500").unwrap(), money("3500"));
        assert_eq!(Money::from_str("¥3500.50").unwrap(), money("3500.50"));
        assert_eq!(Money::from_str(" ¥ 12 ").unwrap(), money("12"));

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("¥").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("3500").to_string(), "¥3500.00");
        assert_eq!(money("3500.5").to_string(), "¥3500.50");
        assert_eq!(money("0.125").to_string(), "¥0.13");
    }

    #[test]
    fn mean() {
        assert_eq!(Money::mean([]), None);
        assert_eq!(
            Money::mean([money("3500"), money("3200"), money("4500")])
                .map(Money::round_to_cents),
            Some(money("3733.33")),
        );
    }

    #[test]
    fn serde_as_number() {
        let json = serde_json::to_string(&money("3500.5")).unwrap();
        assert_eq!(json, "3500.5");

        let parsed: Money = serde_json::from_str("4200").unwrap();
        assert_eq!(parsed, money("4200"));
    }
}
