//! Currency rates quoted against the base currency.
//!
//! A stored row `(base, ccy, rate)` means one unit of the base currency buys
//! `rate` units of `ccy`. Cross rates between two arbitrary currencies pivot
//! through the base: `rate(from → to) = rate(base → to) / rate(base → from)`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::{Currency, EngineError};

/// A directed rate from the base currency to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrencyRate {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "currency_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub from_currency: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub to_currency: String,
    /// Decimal text, kept exact.
    pub rate: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CurrencyRate {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            from: Currency::try_from(model.from_currency.as_str())?,
            to: Currency::try_from(model.to_currency.as_str())?,
            rate: parse_rate(&model.rate)?,
            updated_at: model.updated_at,
        })
    }
}

/// Parses a stored rate and checks it can be used as a divisor.
pub(crate) fn parse_rate(raw: &str) -> Result<Decimal, EngineError> {
    let rate = Decimal::from_str(raw.trim())
        .map_err(|_| EngineError::InvalidRate(format!("not a decimal: {raw}")))?;
    ensure_positive_rate(rate)
}

pub(crate) fn ensure_positive_rate(rate: Decimal) -> Result<Decimal, EngineError> {
    if rate <= Decimal::ZERO {
        return Err(EngineError::InvalidRate(format!("rate must be > 0, got {rate}")));
    }
    Ok(rate)
}

/// Cross rate such that `amount_in_to = amount_in_from * rate`.
///
/// Both inputs are rates quoted from the base currency.
pub(crate) fn cross_rate(
    base_to_from: Decimal,
    base_to_to: Decimal,
) -> Result<Decimal, EngineError> {
    ensure_positive_rate(base_to_from)?;
    base_to_to
        .checked_div(base_to_from)
        .ok_or_else(|| EngineError::InvalidRate("cross rate out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cross_rate_between_non_base_currencies() {
        // base -> JPY = 110.0, base -> EUR = 0.9
        let rate = cross_rate(dec!(110.0), dec!(0.9)).unwrap();
        assert!((rate - dec!(0.0081818)).abs() < dec!(0.0000001));
    }

    #[test]
    fn cross_rate_towards_base() {
        // base -> SGD = 1.35, base -> USD (base) = 1
        let rate = cross_rate(dec!(1.35), Decimal::ONE).unwrap();
        assert!((rate * dec!(50) - dec!(37.037037)).abs() < dec!(0.000001));
    }

    #[test]
    fn cross_rate_with_itself_is_one() {
        assert_eq!(cross_rate(dec!(1.35), dec!(1.35)).unwrap(), Decimal::ONE);
    }

    #[test]
    fn parse_rate_rejects_garbage_and_non_positive() {
        assert_eq!(parse_rate(" 1.35 ").unwrap(), dec!(1.35));
        assert!(parse_rate("abc").is_err());
        assert!(parse_rate("0").is_err());
        assert!(parse_rate("-2").is_err());
    }
}
