use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, prelude::*};

use crate::{Money, ResultEngine, Transaction, TransactionKind, WalletId, transactions};

use super::Engine;

impl Engine {
    /// Appends one transaction row inside the caller's unit of work and
    /// returns it with the store-assigned id and creation time.
    pub(crate) async fn record(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
        kind: TransactionKind,
        amount: Money,
        counterparty_wallet_id: Option<WalletId>,
    ) -> ResultEngine<Transaction> {
        let amount = amount.ensure_positive("amount")?;
        let model = transactions::ActiveModel {
            id: ActiveValue::NotSet,
            wallet_id: ActiveValue::Set(wallet_id),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            amount: ActiveValue::Set(amount.to_minor()?),
            counterparty_wallet_id: ActiveValue::Set(counterparty_wallet_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(db_tx)
        .await?;
        Transaction::try_from(model)
    }
}
