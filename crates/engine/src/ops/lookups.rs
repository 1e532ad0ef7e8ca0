use chrono::Utc;
use sea_orm::{ActiveValue, Condition, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Currency, EngineError, NewWalletCmd, ResultEngine, Transaction, User, UserId, Wallet,
    WalletId, transactions, users,
    util::{canonical_ids, into_domain, normalize_required},
    wallets,
};

use super::Engine;

const DEFAULT_WALLET_KIND: &str = "saving";

impl Engine {
    /// Creates a user.
    pub async fn new_user(&self, name: &str) -> ResultEngine<User> {
        let name = normalize_required(name, "user name")?;
        let model = users::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        tracing::info!(user_id = model.id, "user created");
        Ok(User::from(model))
    }

    /// Creates an empty wallet for an existing user.
    pub async fn new_wallet(&self, cmd: NewWalletCmd) -> ResultEngine<Wallet> {
        let NewWalletCmd {
            user_id,
            currency,
            kind,
            is_default,
        } = cmd;
        self.user(user_id).await?;

        let kind = match kind.trim() {
            "" => DEFAULT_WALLET_KIND.to_string(),
            other => other.to_string(),
        };
        let model = wallets::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            currency: ActiveValue::Set(currency.code().to_string()),
            kind: ActiveValue::Set(kind),
            is_default: ActiveValue::Set(is_default),
            balance: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        tracing::info!(wallet_id = model.id, user_id, %currency, "wallet created");
        Wallet::try_from(model)
    }

    pub async fn user(&self, user_id: UserId) -> ResultEngine<User> {
        self.user_in(&self.database, user_id).await
    }

    pub async fn wallet(&self, wallet_id: WalletId) -> ResultEngine<Wallet> {
        let model = wallets::Entity::find_by_id(wallet_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::WalletNotFound(wallet_id))?;
        Wallet::try_from(model)
    }

    /// Wallets owned by any of `user_ids`, newest first.
    pub async fn wallets_by_users(&self, user_ids: &[UserId]) -> ResultEngine<Vec<Wallet>> {
        self.wallets_by_users_in(&self.database, user_ids).await
    }

    /// Wallets of `user_id` that are either marked default or, when
    /// `currency` is given, hold that currency. Newest first.
    pub async fn default_or_currency_wallets(
        &self,
        user_id: UserId,
        currency: Option<&Currency>,
    ) -> ResultEngine<Vec<Wallet>> {
        let mut condition = Condition::any().add(wallets::Column::IsDefault.eq(true));
        if let Some(currency) = currency {
            condition = condition.add(wallets::Column::Currency.eq(currency.code()));
        }
        let models = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .filter(condition)
            .order_by_desc(wallets::Column::CreatedAt)
            .order_by_desc(wallets::Column::Id)
            .all(&self.database)
            .await?;
        into_domain(models)
    }

    /// Transactions booked on any of `wallet_ids`, newest first.
    pub async fn transactions_by_wallets(
        &self,
        wallet_ids: &[WalletId],
    ) -> ResultEngine<Vec<Transaction>> {
        self.transactions_by_wallets_in(&self.database, wallet_ids)
            .await
    }

    pub(crate) async fn wallets_by_users_in<C>(
        &self,
        conn: &C,
        user_ids: &[UserId],
    ) -> ResultEngine<Vec<Wallet>>
    where
        C: ConnectionTrait,
    {
        let user_ids = canonical_ids(user_ids);
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = wallets::Entity::find()
            .filter(wallets::Column::UserId.is_in(user_ids))
            .order_by_desc(wallets::Column::CreatedAt)
            .order_by_desc(wallets::Column::Id)
            .all(conn)
            .await?;
        into_domain(models)
    }

    pub(crate) async fn transactions_by_wallets_in<C>(
        &self,
        conn: &C,
        wallet_ids: &[WalletId],
    ) -> ResultEngine<Vec<Transaction>>
    where
        C: ConnectionTrait,
    {
        let wallet_ids = canonical_ids(wallet_ids);
        if wallet_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = transactions::Entity::find()
            .filter(transactions::Column::WalletId.is_in(wallet_ids))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(conn)
            .await?;
        into_domain(models)
    }

    pub(crate) async fn user_in<C>(&self, conn: &C, user_id: UserId) -> ResultEngine<User>
    where
        C: ConnectionTrait,
    {
        users::Entity::find_by_id(user_id)
            .one(conn)
            .await?
            .map(User::from)
            .ok_or(EngineError::UserNotFound(user_id))
    }
}
