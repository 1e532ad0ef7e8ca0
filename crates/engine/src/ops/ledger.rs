//! Deposit, withdraw and transfer.
//!
//! Every public operation here opens exactly one unit of work through
//! [`Engine::with_tx`] and composes the balance primitives with the
//! transaction recorder inside it. Debits always read the balance with a
//! locking read first and write the new balance as an absolute value;
//! credits use a relative increment computed by the store, after checking
//! against the locked balance that the result stays storable.

use sea_orm::DatabaseTransaction;

use crate::{
    EngineError, Money, ResultEngine, Transaction, TransactionKind, TransferReceipt, Wallet,
    WalletId, util::canonical_ids,
};

use super::Engine;

impl Engine {
    /// Adds `amount` to a wallet and records a `deposit` row.
    ///
    /// # Errors
    ///
    /// [`EngineError::WalletNotFound`] if the wallet does not exist,
    /// [`EngineError::InvalidAmount`] if `amount` is not strictly positive or
    /// the new balance would not fit the stored range,
    /// [`EngineError::Database`] on store failures. Nothing is written on
    /// error.
    pub async fn deposit(&self, wallet_id: WalletId, amount: Money) -> ResultEngine<Transaction> {
        let amount = amount.ensure_positive("amount")?;
        let transaction = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let wallet = engine.lock_wallet(db_tx, wallet_id).await?;
                    engine
                        .credit(
                            db_tx,
                            wallet_id,
                            wallet.balance,
                            amount,
                            TransactionKind::Deposit,
                            None,
                        )
                        .await
                })
            })
            .await?;
        tracing::info!(
            wallet_id,
            %amount,
            transaction_id = transaction.id,
            "deposit committed"
        );
        Ok(transaction)
    }

    /// Removes `amount` from a wallet and records a `withdraw` row.
    ///
    /// # Errors
    ///
    /// [`EngineError::InsufficientFunds`] if the balance read in the same
    /// unit of work is lower than `amount`; the wallet and its history are
    /// left untouched.
    pub async fn withdraw(&self, wallet_id: WalletId, amount: Money) -> ResultEngine<Transaction> {
        let amount = amount.ensure_positive("amount")?;
        let transaction = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    engine
                        .debit(db_tx, wallet_id, amount, TransactionKind::Withdraw, None)
                        .await
                })
            })
            .await?;
        tracing::info!(
            wallet_id,
            %amount,
            transaction_id = transaction.id,
            "withdraw committed"
        );
        Ok(transaction)
    }

    /// Moves funds between two wallets.
    ///
    /// `source_amount` is taken from the source in its currency and
    /// `target_amount` is added to the target in its currency; the caller
    /// converts beforehand. Both legs commit together or not at all.
    ///
    /// Both wallet rows are locked in ascending id order before the debit,
    /// so two opposite transfers between the same pair cannot deadlock.
    pub async fn transfer(
        &self,
        source_wallet_id: WalletId,
        target_wallet_id: WalletId,
        source_amount: Money,
        target_amount: Money,
    ) -> ResultEngine<TransferReceipt> {
        if source_wallet_id == target_wallet_id {
            return Err(EngineError::InvalidTransfer(
                "source and target wallet must differ".to_string(),
            ));
        }
        let source_amount = source_amount.ensure_positive("source amount")?;
        let target_amount = target_amount.ensure_positive("target amount")?;

        let receipt = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let locked = engine
                        .lock_wallets(db_tx, &[source_wallet_id, target_wallet_id])
                        .await?;
                    let target_balance = locked
                        .iter()
                        .find(|wallet| wallet.id == target_wallet_id)
                        .map(|wallet| wallet.balance)
                        .ok_or(EngineError::WalletNotFound(target_wallet_id))?;
                    let outgoing = engine
                        .debit(
                            db_tx,
                            source_wallet_id,
                            source_amount,
                            TransactionKind::TransferOut,
                            Some(target_wallet_id),
                        )
                        .await?;
                    let incoming = engine
                        .credit(
                            db_tx,
                            target_wallet_id,
                            target_balance,
                            target_amount,
                            TransactionKind::TransferIn,
                            Some(source_wallet_id),
                        )
                        .await?;
                    Ok(TransferReceipt { outgoing, incoming })
                })
            })
            .await?;
        tracing::info!(
            source_wallet_id,
            target_wallet_id,
            %source_amount,
            %target_amount,
            "transfer committed"
        );
        Ok(receipt)
    }

    /// Locks every wallet in `ids`, lowest id first, and returns them in
    /// that order.
    async fn lock_wallets(
        &self,
        db_tx: &DatabaseTransaction,
        ids: &[WalletId],
    ) -> ResultEngine<Vec<Wallet>> {
        let mut locked = Vec::with_capacity(ids.len());
        for wallet_id in canonical_ids(ids) {
            locked.push(self.lock_wallet(db_tx, wallet_id).await?);
        }
        Ok(locked)
    }

    /// Sufficiency check, then record, then absolute write.
    async fn debit(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
        amount: Money,
        kind: TransactionKind,
        counterparty_wallet_id: Option<WalletId>,
    ) -> ResultEngine<Transaction> {
        let balance = self.read_balance(db_tx, wallet_id).await?;
        if balance < amount {
            tracing::warn!(
                wallet_id,
                %balance,
                requested = %amount,
                kind = kind.as_str(),
                "debit rejected: insufficient funds"
            );
            return Err(EngineError::InsufficientFunds {
                wallet_id,
                balance,
                requested: amount,
            });
        }
        let new_balance = balance
            .checked_sub(amount)
            .ok_or_else(|| EngineError::InvalidAmount("balance out of range".to_string()))?;

        let transaction = self
            .record(db_tx, wallet_id, kind, amount, counterparty_wallet_id)
            .await?;
        self.set_balance(db_tx, wallet_id, new_balance).await?;
        Ok(transaction)
    }

    /// Headroom check, then record, then relative increment.
    ///
    /// `balance` comes from the locking read done earlier in the same unit
    /// of work; the store still computes the new value itself.
    async fn credit(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
        balance: Money,
        amount: Money,
        kind: TransactionKind,
        counterparty_wallet_id: Option<WalletId>,
    ) -> ResultEngine<Transaction> {
        let fits = balance
            .checked_add(amount)
            .is_some_and(|new_balance| new_balance.to_minor().is_ok());
        if !fits {
            tracing::warn!(
                wallet_id,
                %balance,
                requested = %amount,
                kind = kind.as_str(),
                "credit rejected: balance out of range"
            );
            return Err(EngineError::InvalidAmount(format!(
                "crediting {amount} would overflow the balance of wallet {wallet_id}"
            )));
        }

        let transaction = self
            .record(db_tx, wallet_id, kind, amount, counterparty_wallet_id)
            .await?;
        self.increment_balance(db_tx, wallet_id, amount).await?;
        Ok(transaction)
    }
}
