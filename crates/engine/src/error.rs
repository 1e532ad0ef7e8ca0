//! The module contains the error the engine can throw.
//!
//! The ones callers are expected to handle are:
//!
//! - [`WalletNotFound`] thrown when a referenced wallet row does not exist.
//! - [`InsufficientFunds`] thrown when a debit exceeds the balance read in the
//!   same database transaction.
//! - [`RateNotFound`] thrown when a currency has no rate against the base.
//! - [`Database`] thrown when the store fails (insert, update, begin, commit,
//!   rollback). Every other variant is a client error.
//!
//!  [`WalletNotFound`]: EngineError::WalletNotFound
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`RateNotFound`]: EngineError::RateNotFound
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

use crate::{Currency, Money, UserId, WalletId};

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("wallet {0} not found")]
    WalletNotFound(WalletId),
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("Insufficient funds in wallet {wallet_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        wallet_id: WalletId,
        balance: Money,
        requested: Money,
    },
    #[error("missing conversion rate for {0}")]
    RateNotFound(Currency),
    #[error("user {user_id} has no default or {currency} wallet")]
    NoDestinationWallet { user_id: UserId, currency: Currency },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid rate: {0}")]
    InvalidRate(String),
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `true` for failures of the underlying store rather than of the request.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::WalletNotFound(a), Self::WalletNotFound(b)) => a == b,
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (
                Self::InsufficientFunds {
                    wallet_id: a,
                    balance: ab,
                    requested: ar,
                },
                Self::InsufficientFunds {
                    wallet_id: b,
                    balance: bb,
                    requested: br,
                },
            ) => a == b && ab == bb && ar == br,
            (Self::RateNotFound(a), Self::RateNotFound(b)) => a == b,
            (
                Self::NoDestinationWallet {
                    user_id: a,
                    currency: ac,
                },
                Self::NoDestinationWallet {
                    user_id: b,
                    currency: bc,
                },
            ) => a == b && ac == bc,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::InvalidRate(a), Self::InvalidRate(b)) => a == b,
            (Self::InvalidTransfer(a), Self::InvalidTransfer(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
