use engine::{Currency, LedgerConfig};
use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wallet_app={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let base_currency: Currency = settings.ledger.base_currency.parse()?;
    let db = parse_database(&settings.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .config(LedgerConfig::new(base_currency))
        .build()
        .await?;
    tracing::info!(base_currency = %engine.base_currency(), "engine ready");

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let mut options = match config {
        Database::Memory => {
            let mut options = ConnectOptions::new("sqlite::memory:");
            // Every pooled connection would open its own empty database.
            options.max_connections(1);
            options
        }
        Database::Sqlite(path) => ConnectOptions::new(format!("sqlite:{}?mode=rwc", path)),
    };
    options.sqlx_logging(false);

    let database = sea_orm::Database::connect(options).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
