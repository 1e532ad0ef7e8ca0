//! Per-user read endpoints.

use api_types::wallet::{WalletFilter, WalletsResponse};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::UserId;

use crate::{ServerError, server::ServerState, views};

/// Balances of the user's wallets and their total in the base currency.
pub async fn balance(
    State(state): State<ServerState>,
    Path(user_id): Path<UserId>,
    Query(filter): Query<WalletFilter>,
) -> Result<Json<WalletsResponse>, ServerError> {
    let overview = state
        .engine
        .wallets_overview(user_id, filter.wallet_id, false)
        .await?;
    Ok(Json(views::wallets(overview, false)))
}

/// Same as [`balance`], with each wallet's history, newest first.
pub async fn transactions(
    State(state): State<ServerState>,
    Path(user_id): Path<UserId>,
    Query(filter): Query<WalletFilter>,
) -> Result<Json<WalletsResponse>, ServerError> {
    let overview = state
        .engine
        .wallets_overview(user_id, filter.wallet_id, true)
        .await?;
    Ok(Json(views::wallets(overview, true)))
}
