//! Wallet write endpoints: deposit, withdraw and transfer.

use api_types::transaction::{AmountRequest, TransactionView, TransferCreated, TransferRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Money, TransferCmd, TransferDestination, WalletId};
use rust_decimal::Decimal;

use crate::{ServerError, server::ServerState, views};

/// Amounts must be strictly positive; precision is checked by the engine.
fn positive_amount(amount: Decimal) -> Result<Money, ServerError> {
    if amount <= Decimal::ZERO {
        return Err(ServerError::Generic(
            "amount must be greater than 0".to_string(),
        ));
    }
    Ok(Money::new(amount)?)
}

fn destination(payload: &TransferRequest) -> Result<TransferDestination, ServerError> {
    match (payload.destination_wallet_id, payload.destination_user_id) {
        (Some(wallet_id), None) => Ok(TransferDestination::Wallet(wallet_id)),
        (None, Some(user_id)) => Ok(TransferDestination::User(user_id)),
        _ => Err(ServerError::Generic(
            "provide exactly one of destination_wallet_id or destination_user_id".to_string(),
        )),
    }
}

pub async fn deposit(
    State(state): State<ServerState>,
    Path(wallet_id): Path<WalletId>,
    Json(payload): Json<AmountRequest>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let amount = positive_amount(payload.amount)?;
    let transaction = state.engine.deposit(wallet_id, amount).await?;
    Ok((StatusCode::CREATED, Json(views::transaction(transaction))))
}

pub async fn withdraw(
    State(state): State<ServerState>,
    Path(wallet_id): Path<WalletId>,
    Json(payload): Json<AmountRequest>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let amount = positive_amount(payload.amount)?;
    let transaction = state.engine.withdraw(wallet_id, amount).await?;
    Ok((StatusCode::CREATED, Json(views::transaction(transaction))))
}

pub async fn transfer(
    State(state): State<ServerState>,
    Path(wallet_id): Path<WalletId>,
    Json(payload): Json<TransferRequest>,
) -> Result<(StatusCode, Json<TransferCreated>), ServerError> {
    let destination = destination(&payload)?;
    let amount = positive_amount(payload.amount)?;

    let receipt = state
        .engine
        .transfer_to(TransferCmd {
            source_wallet_id: wallet_id,
            destination,
            amount,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TransferCreated {
            outgoing: views::transaction(receipt.outgoing),
            incoming: views::transaction(receipt.incoming),
        }),
    ))
}
