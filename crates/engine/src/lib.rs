//! Ledger engine for per-user, multi-currency wallets.
//!
//! Every balance change goes through [`Engine`]: deposits, withdrawals and
//! transfers each run inside exactly one database transaction that appends
//! the immutable [`Transaction`] rows and updates the wallet balance, so the
//! balance and the history never diverge.

pub use commands::{NewWalletCmd, TransferCmd, TransferDestination};
pub use config::LedgerConfig;
pub use currency::Currency;
pub use error::EngineError;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use overview::{WalletView, WalletsOverview};
pub use rates::CurrencyRate;
pub use transactions::{Transaction, TransactionKind, TransferReceipt};
pub use users::User;
pub use wallets::Wallet;

mod commands;
mod config;
mod currency;
mod error;
mod money;
mod ops;
mod overview;
mod rates;
mod transactions;
mod users;
mod util;
mod wallets;

/// Store-assigned identity of a user.
pub type UserId = i64;
/// Store-assigned identity of a wallet.
pub type WalletId = i64;
/// Store-assigned identity of a transaction row.
pub type TransactionId = i64;

type ResultEngine<T> = Result<T, EngineError>;
