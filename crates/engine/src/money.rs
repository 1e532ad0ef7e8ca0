use std::{fmt, ops::Neg, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed fixed-point money amount.
///
/// Use this type for **all** monetary values in the engine (balances,
/// transaction amounts, converted amounts) to avoid floating-point drift.
/// The value carries at most [`Money::SCALE`] fractional digits, which is
/// also the scale used to persist it as an integer of minor units.
///
/// The value is signed, but amounts accepted by ledger operations must be
/// strictly positive: direction is carried by the transaction kind.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount: Money = "12.34".parse().unwrap();
/// assert_eq!(amount.to_minor().unwrap(), 1_234_000_000);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing rejects more fractional digits than the storage scale:
///
/// ```rust
/// use engine::Money;
///
/// assert!("0.123456789".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
#[repr(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Fractional digits kept by every amount.
    pub const SCALE: u32 = 8;
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Builds an amount from an exact decimal.
    ///
    /// Fails if `value` has more than [`Money::SCALE`] significant fractional
    /// digits or does not fit the persisted range.
    pub fn new(value: Decimal) -> Result<Self, EngineError> {
        let value = value.normalize();
        if value.scale() > Self::SCALE {
            return Err(EngineError::InvalidAmount(format!(
                "too many decimals: at most {} allowed",
                Self::SCALE
            )));
        }
        let money = Self(value);
        money.to_minor()?;
        Ok(money)
    }

    /// Builds an amount from a decimal of arbitrary precision, rounding half
    /// away from zero to [`Money::SCALE`] digits. Used for conversion results.
    pub fn rounded(value: Decimal) -> Result<Self, EngineError> {
        Self::new(value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Rebuilds an amount from its persisted integer representation.
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, Self::SCALE).normalize())
    }

    /// Integer representation at [`Money::SCALE`], as stored in the database.
    pub fn to_minor(self) -> Result<i64, EngineError> {
        self.0
            .checked_mul(Decimal::from(10_i64.pow(Self::SCALE)))
            .and_then(|scaled| scaled.to_i64())
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(|v| Money(v.normalize()))
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(|v| Money(v.normalize()))
    }

    /// Rejects zero and negative amounts.
    pub(crate) fn ensure_positive(self, label: &str) -> Result<Self, EngineError> {
        if !self.is_positive() {
            return Err(EngineError::InvalidAmount(format!("{label} must be > 0")));
        }
        Ok(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = EngineError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string such as `"100"`, `"-0.5"` or `"37.03703704"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }
        let value = Decimal::from_str_exact(trimmed)
            .map_err(|_| EngineError::InvalidAmount(format!("invalid amount: {trimmed}")))?;
        Self::new(value)
    }
}
