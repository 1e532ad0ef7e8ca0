//! The module contains `Wallet` struct and its database model.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::{Currency, EngineError, Money, UserId, WalletId};

/// A wallet.
///
/// A wallet holds funds of a single currency for a single user. Its balance
/// is only ever changed by the ledger operations of [`Engine`](crate::Engine),
/// each of which also appends the matching transaction row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub id: WalletId,
    pub user_id: UserId,
    pub currency: Currency,
    /// Free-form wallet kind, e.g. `saving`.
    pub kind: String,
    /// Fallback target when a transfer addresses the user rather than a
    /// wallet. More than one default per user is not prevented.
    pub is_default: bool,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub currency: String,
    pub kind: String,
    pub is_default: bool,
    /// Minor units at [`Money::SCALE`].
    pub balance: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Wallet {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            currency: Currency::try_from(model.currency.as_str())?,
            kind: model.kind,
            is_default: model.is_default,
            balance: Money::from_minor(model.balance),
            created_at: model.created_at,
        })
    }
}
