//! Balance primitives. Each one runs inside the caller's unit of work and
//! never opens its own.

use sea_orm::{DatabaseTransaction, QueryFilter, QuerySelect, prelude::*, sea_query::Expr};

use crate::{EngineError, Money, ResultEngine, Wallet, WalletId, wallets};

use super::Engine;

impl Engine {
    /// Locking read of a wallet row (`SELECT ... FOR UPDATE` where the
    /// backend supports it; SQLite already serializes writers).
    pub(crate) async fn lock_wallet(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
    ) -> ResultEngine<Wallet> {
        let model = wallets::Entity::find_by_id(wallet_id)
            .lock_exclusive()
            .one(db_tx)
            .await?
            .ok_or(EngineError::WalletNotFound(wallet_id))?;
        Wallet::try_from(model)
    }

    /// Balance as seen by the sufficiency check.
    pub(crate) async fn read_balance(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
    ) -> ResultEngine<Money> {
        Ok(self.lock_wallet(db_tx, wallet_id).await?.balance)
    }

    /// Relative update: `balance = balance + delta`, computed by the store.
    pub(crate) async fn increment_balance(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
        delta: Money,
    ) -> ResultEngine<()> {
        let delta = delta.to_minor()?;
        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::Balance,
                Expr::col(wallets::Column::Balance).add(delta),
            )
            .filter(wallets::Column::Id.eq(wallet_id))
            .exec(db_tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::WalletNotFound(wallet_id));
        }
        Ok(())
    }

    /// Absolute update. Only valid after a [`Engine::read_balance`] in the
    /// same unit of work.
    pub(crate) async fn set_balance(
        &self,
        db_tx: &DatabaseTransaction,
        wallet_id: WalletId,
        balance: Money,
    ) -> ResultEngine<()> {
        let balance = balance.to_minor()?;
        let result = wallets::Entity::update_many()
            .col_expr(wallets::Column::Balance, Expr::value(balance))
            .filter(wallets::Column::Id.eq(wallet_id))
            .exec(db_tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::WalletNotFound(wallet_id));
        }
        Ok(())
    }
}
