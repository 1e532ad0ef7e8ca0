use crate::{
    EngineError, ResultEngine, TransferCmd, TransferDestination, TransferReceipt, UserId, Wallet,
};

use super::Engine;

impl Engine {
    /// Resolves the destination, converts the amount into the destination
    /// currency and runs [`Engine::transfer`].
    ///
    /// A [`TransferDestination::User`] lands in that user's newest wallet
    /// holding the source currency, else in their newest default wallet.
    /// Conversion happens before the unit of work opens; the rate used is
    /// the one visible at that moment.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTransfer`] when the user destination is the
    ///   source wallet's own owner, or the wallets are the same.
    /// - [`EngineError::NoDestinationWallet`] when the user has no suitable
    ///   wallet.
    /// - [`EngineError::RateNotFound`] when currencies differ and a rate is
    ///   missing. Nothing is written in that case.
    pub async fn transfer_to(&self, cmd: TransferCmd) -> ResultEngine<TransferReceipt> {
        let TransferCmd {
            source_wallet_id,
            destination,
            amount,
        } = cmd;
        let amount = amount.ensure_positive("amount")?;
        let source = self.wallet(source_wallet_id).await?;

        let target = match destination {
            TransferDestination::Wallet(wallet_id) => self.wallet(wallet_id).await?,
            TransferDestination::User(user_id) => self.destination_wallet(&source, user_id).await?,
        };

        let target_amount = if source.currency == target.currency {
            amount
        } else {
            self.convert(amount, &source.currency, &target.currency)
                .await?
                .ensure_positive("converted amount")?
        };

        self.transfer(source.id, target.id, amount, target_amount)
            .await
    }

    async fn destination_wallet(&self, source: &Wallet, user_id: UserId) -> ResultEngine<Wallet> {
        if source.user_id == user_id {
            return Err(EngineError::InvalidTransfer(
                "cannot transfer to the source wallet's own user".to_string(),
            ));
        }
        self.user(user_id).await?;

        let mut candidates = self
            .default_or_currency_wallets(user_id, Some(&source.currency))
            .await?;
        let same_currency = candidates
            .iter()
            .position(|wallet| wallet.currency == source.currency);
        let index = same_currency.or_else(|| candidates.iter().position(|wallet| wallet.is_default));

        match index {
            Some(index) => Ok(candidates.swap_remove(index)),
            None => Err(EngineError::NoDestinationWallet {
                user_id,
                currency: source.currency.clone(),
            }),
        }
    }
}
