//! Read-side view of a user's wallets.
//!
//! The view is assembled from rows read in one unit of work, so balances,
//! histories and rates come from the same snapshot.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::{Currency, Money, Transaction, User, Wallet, WalletId};

/// One wallet with its history, newest first. The history is empty when
/// transactions were not requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WalletView {
    pub wallet: Wallet,
    pub transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WalletsOverview {
    pub user: User,
    pub base_currency: Currency,
    pub wallets: Vec<WalletView>,
    /// Sum of all listed balances expressed in `base_currency`; `None` when
    /// a rate needed for the conversion is missing.
    ///
    /// Only displayed, never stored, so it is not bound to the range of a
    /// wallet balance.
    pub total_balance: Option<Decimal>,
}

/// Attaches each transaction to its wallet, keeping both input orders.
pub(crate) fn group_by_wallet(
    wallets: Vec<Wallet>,
    transactions: Vec<Transaction>,
) -> Vec<WalletView> {
    let mut grouped: HashMap<WalletId, Vec<Transaction>> = HashMap::new();
    for transaction in transactions {
        grouped
            .entry(transaction.wallet_id)
            .or_default()
            .push(transaction);
    }
    wallets
        .into_iter()
        .map(|wallet| WalletView {
            transactions: grouped.remove(&wallet.id).unwrap_or_default(),
            wallet,
        })
        .collect()
}

/// Total of `wallets` in the base currency, dividing each balance by its
/// rate from the base and rounding once to [`Money::SCALE`] digits. `rates`
/// must hold 1 for the base currency.
///
/// Returns `None` as soon as one currency has no rate.
pub(crate) fn total_in_base(
    wallets: &[Wallet],
    rates: &HashMap<Currency, Decimal>,
) -> Option<Decimal> {
    let mut total = Decimal::ZERO;
    for wallet in wallets {
        let rate = rates.get(&wallet.currency)?;
        let Some(sum) = wallet
            .balance
            .value()
            .checked_div(*rate)
            .and_then(|in_base| total.checked_add(in_base))
        else {
            tracing::warn!(
                wallet_id = wallet.id,
                currency = %wallet.currency,
                %rate,
                "total balance exceeds decimal range, omitting it"
            );
            return None;
        };
        total = sum;
    }
    Some(
        total
            .round_dp_with_strategy(Money::SCALE, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TransactionKind;

    fn wallet(id: WalletId, currency: &str, balance: Decimal) -> Wallet {
        Wallet {
            id,
            user_id: 1,
            currency: currency.parse().unwrap(),
            kind: "saving".to_string(),
            is_default: id == 1,
            balance: Money::new(balance).unwrap(),
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    fn deposit(id: i64, wallet_id: WalletId, amount: Decimal) -> Transaction {
        Transaction {
            id,
            wallet_id,
            kind: TransactionKind::Deposit,
            amount: Money::new(amount).unwrap(),
            counterparty_wallet_id: None,
            created_at: Utc.timestamp_opt(id, 0).unwrap(),
        }
    }

    fn rates(entries: &[(&str, Decimal)]) -> HashMap<Currency, Decimal> {
        entries
            .iter()
            .map(|(code, rate)| (code.parse().unwrap(), *rate))
            .collect()
    }

    #[test]
    fn total_divides_by_rate_from_base() {
        let wallets = vec![wallet(1, "USD", dec!(100)), wallet(2, "EUR", dec!(50))];
        let total = total_in_base(&wallets, &rates(&[("USD", dec!(1)), ("EUR", dec!(0.5))]));
        assert_eq!(total, Some(dec!(200)));
    }

    #[test]
    fn total_is_absent_when_a_rate_is_missing() {
        let wallets = vec![wallet(1, "USD", dec!(100)), wallet(2, "EUR", dec!(50))];
        let total = total_in_base(&wallets, &rates(&[("USD", dec!(1))]));
        assert_eq!(total, None);
    }

    #[test]
    fn total_of_no_wallets_is_zero() {
        assert_eq!(total_in_base(&[], &HashMap::new()), Some(Decimal::ZERO));
    }

    #[test]
    fn total_may_exceed_the_storable_balance_range() {
        // Each balance is close to the largest storable one.
        let wallets = vec![
            wallet(1, "USD", dec!(90000000000)),
            wallet(2, "USD", dec!(90000000000)),
            wallet(3, "EUR", dec!(45000000000)),
        ];
        let total = total_in_base(&wallets, &rates(&[("USD", dec!(1)), ("EUR", dec!(0.25))]));
        assert_eq!(total, Some(dec!(360000000000)));
    }

    #[test]
    fn total_rounds_once_at_the_end() {
        let wallets = vec![wallet(1, "SGD", dec!(1)), wallet(2, "SGD", dec!(1))];
        let total = total_in_base(&wallets, &rates(&[("SGD", dec!(3))]));
        assert_eq!(total, Some(dec!(0.66666667)));
    }

    #[test]
    fn transactions_are_grouped_under_their_wallet() {
        let wallets = vec![wallet(2, "EUR", dec!(50)), wallet(1, "USD", dec!(100))];
        let transactions = vec![
            deposit(3, 1, dec!(60)),
            deposit(2, 2, dec!(50)),
            deposit(1, 1, dec!(40)),
        ];

        let views = group_by_wallet(wallets, transactions);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].wallet.id, 2);
        assert_eq!(views[0].transactions.len(), 1);
        assert_eq!(
            views[1].transactions.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![3, 1]
        );
    }

    #[test]
    fn wallet_without_history_gets_empty_list() {
        let views = group_by_wallet(vec![wallet(1, "USD", dec!(0))], Vec::new());
        assert!(views[0].transactions.is_empty());
    }
}
