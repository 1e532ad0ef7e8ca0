use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Currency, Engine, LedgerConfig, NewWalletCmd, UserId};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "wallet_admin")]
#[command(about = "Admin utilities for the wallet ledger (bootstrap users/wallets/rates)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./wallets.db?mode=rwc"
    )]
    database_url: String,

    /// Reference currency rates are stored against.
    #[arg(long, env = "WALLET_LEDGER__BASE_CURRENCY", default_value = "USD")]
    base_currency: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Wallet(Wallet),
    Rate(Rate),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Wallet {
    #[command(subcommand)]
    command: WalletCommand,
}

#[derive(Subcommand, Debug)]
enum WalletCommand {
    Create(WalletCreateArgs),
}

#[derive(Args, Debug)]
struct WalletCreateArgs {
    #[arg(long)]
    user: UserId,
    #[arg(long, default_value = "USD")]
    currency: String,
    #[arg(long, default_value = "saving")]
    kind: String,
    /// Mark the wallet as the user's default.
    #[arg(long)]
    default: bool,
}

#[derive(Args, Debug)]
struct Rate {
    #[command(subcommand)]
    command: RateCommand,
}

#[derive(Subcommand, Debug)]
enum RateCommand {
    /// Units of `currency` per one unit of the base currency.
    Set(RateSetArgs),
}

#[derive(Args, Debug)]
struct RateSetArgs {
    #[arg(long)]
    currency: String,
    #[arg(long)]
    rate: Decimal,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let base_currency: Currency = cli.base_currency.parse()?;
    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .config(LedgerConfig::new(base_currency))
        .build()
        .await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let user = engine.new_user(&args.name).await?;
            println!("created user: {} ({})", user.name, user.id);
        }
        Command::Wallet(Wallet {
            command: WalletCommand::Create(args),
        }) => {
            let currency: Currency = match args.currency.parse() {
                Ok(v) => v,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };

            let wallet = engine
                .new_wallet(NewWalletCmd {
                    user_id: args.user,
                    currency,
                    kind: args.kind,
                    is_default: args.default,
                })
                .await?;
            println!(
                "created wallet: {} {} for user {} ({})",
                wallet.kind, wallet.currency, wallet.user_id, wallet.id
            );
        }
        Command::Rate(Rate {
            command: RateCommand::Set(args),
        }) => {
            let currency: Currency = args.currency.parse()?;
            let rate = engine.set_rate(&currency, args.rate).await?;
            println!(
                "rate set: 1 {} = {} {}",
                rate.from, rate.rate, rate.to
            );
        }
    }

    Ok(())
}
