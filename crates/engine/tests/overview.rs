use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database};

use engine::{Currency, Engine, EngineError, LedgerConfig, Money, NewWalletCmd, TransactionKind};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder()
        .database(db)
        .config(LedgerConfig::default())
        .build()
        .await
        .unwrap()
}

fn ccy(code: &str) -> Currency {
    code.parse().unwrap()
}

fn money(value: &str) -> Money {
    value.parse().unwrap()
}

async fn wallet_with(engine: &Engine, user_id: i64, currency: &str, amount: &str) -> i64 {
    let wallet = engine
        .new_wallet(NewWalletCmd {
            user_id,
            currency: ccy(currency),
            kind: String::new(),
            is_default: currency == "USD",
        })
        .await
        .unwrap();
    engine.deposit(wallet.id, money(amount)).await.unwrap();
    wallet.id
}

#[tokio::test]
async fn overview_totals_in_base_currency() {
    let engine = engine_with_db().await;
    engine.set_rate(&ccy("EUR"), dec!(0.5)).await.unwrap();
    let alice = engine.new_user("alice").await.unwrap();
    let usd = wallet_with(&engine, alice.id, "USD", "100").await;
    let eur = wallet_with(&engine, alice.id, "EUR", "50").await;

    let overview = engine.wallets_overview(alice.id, None, false).await.unwrap();

    assert_eq!(overview.user, alice);
    assert_eq!(overview.base_currency, ccy("USD"));
    assert_eq!(overview.total_balance, Some(dec!(200)));
    let ids: Vec<_> = overview.wallets.iter().map(|view| view.wallet.id).collect();
    assert_eq!(ids, vec![eur, usd]);
    assert!(overview.wallets.iter().all(|view| view.transactions.is_empty()));
    assert_eq!(overview.wallets[1].wallet.kind, "saving");
}

#[tokio::test]
async fn overview_omits_total_when_rate_is_missing() {
    let engine = engine_with_db().await;
    let alice = engine.new_user("alice").await.unwrap();
    wallet_with(&engine, alice.id, "USD", "100").await;
    wallet_with(&engine, alice.id, "EUR", "50").await;

    let overview = engine.wallets_overview(alice.id, None, true).await.unwrap();

    assert_eq!(overview.wallets.len(), 2);
    assert_eq!(overview.total_balance, None);
}

#[tokio::test]
async fn history_groups_rows_per_wallet_newest_first() {
    let engine = engine_with_db().await;
    let alice = engine.new_user("alice").await.unwrap();
    let bob = engine.new_user("bob").await.unwrap();
    let usd = wallet_with(&engine, alice.id, "USD", "100").await;
    let other = wallet_with(&engine, bob.id, "USD", "5").await;
    engine.withdraw(usd, money("30")).await.unwrap();
    engine.transfer(usd, other, money("20"), money("20")).await.unwrap();

    let overview = engine.wallets_overview(alice.id, None, true).await.unwrap();

    assert_eq!(overview.wallets.len(), 1);
    let kinds: Vec<_> = overview.wallets[0]
        .transactions
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::TransferOut,
            TransactionKind::Withdraw,
            TransactionKind::Deposit,
        ]
    );
    assert_eq!(overview.wallets[0].wallet.balance, money("50"));
    assert_eq!(overview.total_balance, Some(dec!(50)));
}

#[tokio::test]
async fn history_can_be_restricted_to_one_wallet() {
    let engine = engine_with_db().await;
    engine.set_rate(&ccy("EUR"), dec!(0.5)).await.unwrap();
    let alice = engine.new_user("alice").await.unwrap();
    wallet_with(&engine, alice.id, "USD", "100").await;
    let eur = wallet_with(&engine, alice.id, "EUR", "50").await;

    let overview = engine
        .wallets_overview(alice.id, Some(eur), true)
        .await
        .unwrap();

    assert_eq!(overview.wallets.len(), 1);
    assert_eq!(overview.wallets[0].wallet.id, eur);
    assert_eq!(overview.wallets[0].transactions.len(), 1);
    assert_eq!(overview.total_balance, Some(dec!(100)));
}

#[tokio::test]
async fn foreign_wallet_filter_is_not_found() {
    let engine = engine_with_db().await;
    let alice = engine.new_user("alice").await.unwrap();
    let bob = engine.new_user("bob").await.unwrap();
    let bobs = wallet_with(&engine, bob.id, "USD", "1").await;

    assert_eq!(
        engine
            .wallets_overview(alice.id, Some(bobs), true)
            .await
            .unwrap_err(),
        EngineError::WalletNotFound(bobs)
    );
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let engine = engine_with_db().await;

    assert_eq!(
        engine.wallets_overview(42, None, false).await.unwrap_err(),
        EngineError::UserNotFound(42)
    );
}

#[tokio::test]
async fn user_without_wallets_has_zero_total() {
    let engine = engine_with_db().await;
    let alice = engine.new_user("alice").await.unwrap();

    let overview = engine.wallets_overview(alice.id, None, true).await.unwrap();

    assert!(overview.wallets.is_empty());
    assert_eq!(overview.total_balance, Some(dec!(0)));
}

#[tokio::test]
async fn lookups_return_empty_for_empty_id_lists() {
    let engine = engine_with_db().await;

    assert!(engine.wallets_by_users(&[]).await.unwrap().is_empty());
    assert!(engine.transactions_by_wallets(&[]).await.unwrap().is_empty());
    assert_eq!(
        engine.user(7).await.unwrap_err(),
        EngineError::UserNotFound(7)
    );
    assert!(matches!(
        engine.new_user("   ").await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn total_above_the_storable_balance_range_is_still_reported() {
    let engine = engine_with_db().await;
    engine.set_rate(&ccy("EUR"), dec!(0.5)).await.unwrap();
    let alice = engine.new_user("alice").await.unwrap();
    wallet_with(&engine, alice.id, "USD", "90000000000").await;
    wallet_with(&engine, alice.id, "USD", "90000000000").await;
    wallet_with(&engine, alice.id, "EUR", "90000000000").await;

    let overview = engine.wallets_overview(alice.id, None, true).await.unwrap();

    assert_eq!(overview.wallets.len(), 3);
    assert_eq!(overview.total_balance, Some(dec!(360000000000)));
}
