use std::{future::Future, pin::Pin};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{Currency, LedgerConfig, ResultEngine};

mod balances;
mod ledger;
mod lookups;
mod overview;
mod rates;
mod recorder;
mod transfers;

/// Boxed future returned by a unit-of-work body.
pub(crate) type TxFuture<'c, T> = Pin<Box<dyn Future<Output = ResultEngine<T>> + Send + 'c>>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    config: LedgerConfig,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Currency every rate is quoted from.
    pub fn base_currency(&self) -> &Currency {
        &self.config.base_currency
    }

    /// Runs `op` inside one database transaction.
    ///
    /// Commits when `op` returns `Ok`, rolls back when it returns `Err`. If
    /// the future panics or is dropped before completion, the
    /// `DatabaseTransaction` is dropped unfinished and rolls back on drop, so
    /// no partial write is ever committed.
    pub(crate) async fn with_tx<T, F>(&self, op: F) -> ResultEngine<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c Engine, &'c DatabaseTransaction) -> TxFuture<'c, T> + Send,
    {
        let db_tx = self.database.begin().await?;
        let result = op(self, &db_tx).await;
        match result {
            Ok(value) => {
                db_tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = db_tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    config: LedgerConfig,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Pass the ledger configuration. Defaults to a `USD` base currency.
    pub fn config(mut self, config: LedgerConfig) -> EngineBuilder {
        self.config = config;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use migration::MigratorTrait;
    use sea_orm::{ConnectOptions, Database};

    use super::*;
    use crate::{Money, NewWalletCmd, TransactionKind};

    async fn engine() -> Engine {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    #[tokio::test]
    async fn panic_inside_unit_of_work_rolls_back() {
        let engine = Arc::new(engine().await);
        let user = engine.new_user("alice").await.unwrap();
        let wallet = engine
            .new_wallet(NewWalletCmd {
                user_id: user.id,
                currency: "USD".parse().unwrap(),
                kind: String::new(),
                is_default: true,
            })
            .await
            .unwrap();
        let wallet_id = wallet.id;
        let amount: Money = "10".parse().unwrap();

        let task_engine = Arc::clone(&engine);
        let handle = tokio::spawn(async move {
            task_engine
                .with_tx(|engine, db_tx| {
                    Box::pin(async move {
                        engine
                            .record(db_tx, wallet_id, TransactionKind::Deposit, amount, None)
                            .await?;
                        engine.increment_balance(db_tx, wallet_id, amount).await?;
                        if amount.is_positive() {
                            panic!("crash between writes");
                        }
                        Ok(())
                    })
                })
                .await
        });
        let join = handle.await;
        assert!(join.is_err_and(|err| err.is_panic()));

        let wallet = engine.wallet(wallet_id).await.unwrap();
        assert_eq!(wallet.balance, Money::ZERO);
        assert!(
            engine
                .transactions_by_wallets(&[wallet_id])
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn error_inside_unit_of_work_rolls_back() {
        let engine = engine().await;
        let user = engine.new_user("bob").await.unwrap();
        let wallet = engine
            .new_wallet(NewWalletCmd {
                user_id: user.id,
                currency: "EUR".parse().unwrap(),
                kind: "saving".to_string(),
                is_default: false,
            })
            .await
            .unwrap();
        let wallet_id = wallet.id;
        let amount: Money = "5".parse().unwrap();

        let err = engine
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    engine.increment_balance(db_tx, wallet_id, amount).await?;
                    engine.increment_balance(db_tx, wallet_id + 100, amount).await?;
                    Ok(())
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err, crate::EngineError::WalletNotFound(wallet_id + 100));

        let wallet = engine.wallet(wallet_id).await.unwrap();
        assert_eq!(wallet.balance, Money::ZERO);
    }
}
