use crate::{
    EngineError, ResultEngine, UserId, WalletId, WalletsOverview,
    overview::{group_by_wallet, total_in_base},
};

use super::Engine;

impl Engine {
    /// Balances (and optionally histories) of a user's wallets, with their
    /// total in the base currency.
    ///
    /// With `wallet_id` set the view is restricted to that wallet, which must
    /// belong to the user; otherwise [`EngineError::WalletNotFound`].
    /// All reads happen in one unit of work.
    pub async fn wallets_overview(
        &self,
        user_id: UserId,
        wallet_id: Option<WalletId>,
        with_transactions: bool,
    ) -> ResultEngine<WalletsOverview> {
        self.with_tx(|engine, db_tx| {
            Box::pin(async move {
                let user = engine.user_in(db_tx, user_id).await?;
                let mut wallets = engine.wallets_by_users_in(db_tx, &[user_id]).await?;
                if let Some(wallet_id) = wallet_id {
                    wallets.retain(|wallet| wallet.id == wallet_id);
                    if wallets.is_empty() {
                        return Err(EngineError::WalletNotFound(wallet_id));
                    }
                }

                let transactions = if with_transactions {
                    let ids: Vec<WalletId> = wallets.iter().map(|wallet| wallet.id).collect();
                    engine.transactions_by_wallets_in(db_tx, &ids).await?
                } else {
                    Vec::new()
                };

                let currencies: Vec<_> = wallets.iter().map(|w| w.currency.clone()).collect();
                let rates = engine.base_rates(db_tx, &currencies).await?;
                let total_balance = total_in_base(&wallets, &rates);

                Ok(WalletsOverview {
                    user,
                    base_currency: engine.base_currency().clone(),
                    wallets: group_by_wallet(wallets, transactions),
                    total_balance,
                })
            })
        })
        .await
    }
}
