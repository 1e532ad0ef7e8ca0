use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, prelude::*, sea_query::OnConflict,
};

use crate::{
    Currency, CurrencyRate, EngineError, Money, ResultEngine,
    rates::{self, cross_rate, ensure_positive_rate},
};

use super::Engine;

impl Engine {
    /// Rate from the base currency to `currency`; exactly 1 for the base.
    ///
    /// # Errors
    ///
    /// [`EngineError::RateNotFound`] if no rate is stored for `currency`.
    pub async fn rate_to_base(&self, currency: &Currency) -> ResultEngine<Decimal> {
        let rates = self
            .base_rates(&self.database, std::slice::from_ref(currency))
            .await?;
        rates
            .get(currency)
            .copied()
            .ok_or_else(|| EngineError::RateNotFound(currency.clone()))
    }

    /// Batch form of [`Engine::rate_to_base`]. Currencies without a stored
    /// rate are absent from the map instead of failing the lookup.
    pub async fn rates_to_base(
        &self,
        currencies: &[Currency],
    ) -> ResultEngine<HashMap<Currency, Decimal>> {
        self.base_rates(&self.database, currencies).await
    }

    /// Rate such that `amount_in_to = amount_in_from * rate`.
    ///
    /// # Errors
    ///
    /// [`EngineError::RateNotFound`] naming the first side without a rate.
    pub async fn rate_between(&self, from: &Currency, to: &Currency) -> ResultEngine<Decimal> {
        self.rate_between_in(&self.database, from, to).await
    }

    /// Converts `amount` from one currency to another, rounding half away
    /// from zero to the storage scale.
    pub async fn convert(&self, amount: Money, from: &Currency, to: &Currency) -> ResultEngine<Money> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.rate_between(from, to).await?;
        let converted = amount
            .value()
            .checked_mul(rate)
            .ok_or_else(|| EngineError::InvalidAmount("converted amount out of range".to_string()))?;
        Money::rounded(converted)
    }

    /// Stores (or replaces) the rate from the base currency to `currency`.
    pub async fn set_rate(&self, currency: &Currency, rate: Decimal) -> ResultEngine<CurrencyRate> {
        let base = self.base_currency().clone();
        if *currency == base {
            return Err(EngineError::InvalidRate(format!(
                "{base} is the base currency, its rate is always 1"
            )));
        }
        let rate = ensure_positive_rate(rate)?.normalize();
        let updated_at = Utc::now();

        let model = rates::ActiveModel {
            from_currency: ActiveValue::Set(base.code().to_string()),
            to_currency: ActiveValue::Set(currency.code().to_string()),
            rate: ActiveValue::Set(rate.to_string()),
            updated_at: ActiveValue::Set(updated_at),
        };
        rates::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([rates::Column::FromCurrency, rates::Column::ToCurrency])
                    .update_columns([rates::Column::Rate, rates::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;

        tracing::info!(from = %base, to = %currency, %rate, "currency rate stored");
        Ok(CurrencyRate {
            from: base,
            to: currency.clone(),
            rate,
            updated_at,
        })
    }

    pub(crate) async fn rate_between_in<C>(
        &self,
        conn: &C,
        from: &Currency,
        to: &Currency,
    ) -> ResultEngine<Decimal>
    where
        C: ConnectionTrait,
    {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let rates = self.base_rates(conn, &[from.clone(), to.clone()]).await?;
        let base_to_from = rates
            .get(from)
            .copied()
            .ok_or_else(|| EngineError::RateNotFound(from.clone()))?;
        let base_to_to = rates
            .get(to)
            .copied()
            .ok_or_else(|| EngineError::RateNotFound(to.clone()))?;
        cross_rate(base_to_from, base_to_to)
    }

    /// Rates from the base for every requested currency that has one, the
    /// base itself included at 1. One `IN (...)` query.
    pub(crate) async fn base_rates<C>(
        &self,
        conn: &C,
        currencies: &[Currency],
    ) -> ResultEngine<HashMap<Currency, Decimal>>
    where
        C: ConnectionTrait,
    {
        let base = self.base_currency();
        let mut found = HashMap::new();
        let mut wanted: Vec<String> = Vec::new();
        for currency in currencies {
            if currency == base {
                found.insert(currency.clone(), Decimal::ONE);
            } else {
                wanted.push(currency.code().to_string());
            }
        }
        wanted.sort_unstable();
        wanted.dedup();
        if wanted.is_empty() {
            return Ok(found);
        }

        let models = rates::Entity::find()
            .filter(rates::Column::FromCurrency.eq(base.code()))
            .filter(rates::Column::ToCurrency.is_in(wanted))
            .all(conn)
            .await?;
        for model in models {
            let rate = CurrencyRate::try_from(model)?;
            found.insert(rate.to, rate.rate);
        }
        Ok(found)
    }
}
