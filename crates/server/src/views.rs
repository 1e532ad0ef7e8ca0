//! Engine values to JSON bodies.

use api_types::{
    transaction::{TransactionKind, TransactionView},
    user::UserInfo,
    wallet::{TotalBalance, WalletDetail, WalletsResponse},
};
use engine::{Transaction, WalletsOverview};

fn kind(kind: engine::TransactionKind) -> TransactionKind {
    match kind {
        engine::TransactionKind::Deposit => TransactionKind::Deposit,
        engine::TransactionKind::Withdraw => TransactionKind::Withdraw,
        engine::TransactionKind::TransferOut => TransactionKind::TransferOut,
        engine::TransactionKind::TransferIn => TransactionKind::TransferIn,
    }
}

pub(crate) fn transaction(transaction: Transaction) -> TransactionView {
    TransactionView {
        id: transaction.id,
        wallet_id: transaction.wallet_id,
        kind: kind(transaction.kind),
        amount: transaction.amount.value(),
        counterparty_wallet_id: transaction.counterparty_wallet_id,
        created_at: transaction.created_at,
    }
}

/// `with_transactions` decides whether each wallet carries its history.
pub(crate) fn wallets(overview: WalletsOverview, with_transactions: bool) -> WalletsResponse {
    let base_currency = overview.base_currency.to_string();
    WalletsResponse {
        user_info: UserInfo {
            id: overview.user.id,
            name: overview.user.name,
        },
        wallets: overview
            .wallets
            .into_iter()
            .map(|view| WalletDetail {
                id: view.wallet.id,
                currency: view.wallet.currency.to_string(),
                kind: view.wallet.kind,
                is_default: view.wallet.is_default,
                balance: view.wallet.balance.value(),
                transactions: with_transactions
                    .then(|| view.transactions.into_iter().map(transaction).collect()),
            })
            .collect(),
        total_balance: overview.total_balance.map(|amount| TotalBalance {
            amount,
            currency: base_currency,
        }),
    }
}
