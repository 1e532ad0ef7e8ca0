use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{users, wallets};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users/{id}/wallets/balance", get(users::balance))
        .route("/users/{id}/wallets/transactions", get(users::transactions))
        .route("/wallets/{id}/deposit", post(wallets::deposit))
        .route("/wallets/{id}/withdraw", post(wallets::withdraw))
        .route("/wallets/{id}/transfer", post(wallets::transfer))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
