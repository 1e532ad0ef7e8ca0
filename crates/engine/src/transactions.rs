//! Transaction records.
//!
//! A `Transaction` is an immutable, append-only row booked against one
//! wallet. Its amount is always strictly positive; whether it adds to or
//! subtracts from the balance is decided by its [`TransactionKind`].
//!
//! A transfer is booked as two rows, one `transfer-out` on the source and one
//! `transfer-in` on the target, each naming the other wallet as counterparty.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, TransactionId, WalletId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::TransferOut => "transfer-out",
            Self::TransferIn => "transfer-in",
        }
    }

    /// `true` for kinds that add to the wallet balance.
    pub fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// Applies the kind's direction to a (positive) amount.
    pub fn signed(self, amount: Money) -> Money {
        if self.is_credit() {
            amount
        } else {
            -amount
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            "transfer-out" => Ok(Self::TransferOut),
            "transfer-in" => Ok(Self::TransferIn),
            other => Err(EngineError::InvalidInput(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub wallet_id: WalletId,
    pub kind: TransactionKind,
    pub amount: Money,
    /// Other side of a transfer leg; `None` for deposits and withdrawals.
    pub counterparty_wallet_id: Option<WalletId>,
    pub created_at: DateTime<Utc>,
}

/// Both legs booked by a committed transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub outgoing: Transaction,
    pub incoming: Transaction,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub wallet_id: i64,
    pub kind: String,
    /// Minor units at [`Money::SCALE`], always > 0.
    pub amount: i64,
    pub counterparty_wallet_id: Option<i64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Wallet,
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::CounterpartyWalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Counterparty,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            wallet_id: model.wallet_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: Money::from_minor(model.amount),
            counterparty_wallet_id: model.counterparty_wallet_id,
            created_at: model.created_at,
        })
    }
}
