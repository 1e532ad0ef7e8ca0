//! Command inputs for engine operations that take more than a couple of
//! arguments.

use crate::{Currency, Money, UserId, WalletId};

/// Input for [`Engine::new_wallet`](crate::Engine::new_wallet).
#[derive(Clone, Debug)]
pub struct NewWalletCmd {
    pub user_id: UserId,
    pub currency: Currency,
    /// Wallet kind; blank falls back to `saving`.
    pub kind: String,
    pub is_default: bool,
}

/// Where a transfer should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferDestination {
    /// A specific wallet, in whatever currency it holds.
    Wallet(WalletId),
    /// Another user's wallet in the source currency, falling back to that
    /// user's default wallet.
    User(UserId),
}

/// Input for [`Engine::transfer_to`](crate::Engine::transfer_to).
///
/// `amount` is expressed in the source wallet's currency.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub source_wallet_id: WalletId,
    pub destination: TransferDestination,
    pub amount: Money,
}
