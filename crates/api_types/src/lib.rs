use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserInfo {
        pub id: i64,
        pub name: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum TransactionKind {
        Deposit,
        Withdraw,
        TransferOut,
        TransferIn,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub wallet_id: i64,
        pub kind: TransactionKind,
        /// Always > 0, decimal string. The kind carries the direction.
        pub amount: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub counterparty_wallet_id: Option<i64>,
        pub created_at: DateTime<Utc>,
    }

    /// Body of `POST /wallets/{id}/deposit` and `POST /wallets/{id}/withdraw`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountRequest {
        /// Must be > 0, at most 8 decimals.
        pub amount: Decimal,
    }

    /// Body of `POST /wallets/{id}/transfer`.
    ///
    /// Exactly one of `destination_wallet_id` and `destination_user_id` must
    /// be set. `amount` is in the source wallet's currency.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferRequest {
        pub amount: Decimal,
        pub destination_wallet_id: Option<i64>,
        pub destination_user_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferCreated {
        pub outgoing: TransactionView,
        pub incoming: TransactionView,
    }
}

pub mod wallet {
    use super::*;
    use crate::{transaction::TransactionView, user::UserInfo};

    /// Query string of the `GET /users/{id}/wallets/*` routes.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WalletFilter {
        pub wallet_id: Option<i64>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WalletDetail {
        pub id: i64,
        pub currency: String,
        pub kind: String,
        pub is_default: bool,
        pub balance: Decimal,
        /// Newest first. Only present on the transactions route.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub transactions: Option<Vec<TransactionView>>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TotalBalance {
        pub amount: Decimal,
        pub currency: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletsResponse {
        pub user_info: UserInfo,
        pub wallets: Vec<WalletDetail>,
        /// Absent when a conversion rate is missing.
        pub total_balance: Option<TotalBalance>,
    }
}
