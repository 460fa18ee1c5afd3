//! Bankstore Binary Entry Point
//!
//! Command-line access to the customer store.
//! Core functionality is provided by the `bankstore` library crate.

use std::time::Duration;

use bankstore::{
    Customer, CustomerRepository, FullName, StorageBuilder, StorageHandles,
    config::{AppConfig, parse_duration},
    demo,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bankstore - customer record store
#[derive(Parser, Debug)]
#[command(name = "bankstore", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "BANKSTORE_CONFIG")]
    config: Option<String>,

    /// Database URL (overrides config file)
    #[arg(long, env = "BANKSTORE_DB_URL")]
    db_url: Option<String>,

    /// Maximum pooled connections (overrides config file)
    #[arg(long, env = "BANKSTORE_MAX_CONNECTIONS")]
    max_connections: Option<u32>,

    /// Pool acquire timeout, e.g. "5s" (overrides config file)
    #[arg(long, env = "BANKSTORE_ACQUIRE_TIMEOUT", value_parser = parse_duration)]
    acquire_timeout: Option<Duration>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the customers table if it does not exist
    Init,

    /// Add a customer
    Add {
        #[arg(long)]
        account_no: i64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        middle_name: Option<String>,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Stored as plain text
        #[arg(long, env = "BANKSTORE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        contact_no: i64,
    },

    /// Print one customer as JSON
    Get { account_no: i64 },

    /// Print all customers as JSON
    List,

    /// Change a customer's contact number
    UpdateContact { account_no: i64, contact_no: i64 },

    /// Delete a customer
    Delete { account_no: i64 },

    /// Add a random customer, list all, and fetch one at random
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bankstore=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(url) = cli.db_url {
        config.database.url = url;
    }
    if let Some(max) = cli.max_connections {
        config.database.max_connections = max;
    }
    if let Some(timeout) = cli.acquire_timeout {
        config.database.acquire_timeout = timeout;
    }
    config.validate()?;

    let handles = build_storage(&config).await?;
    let result = run(cli.command, &handles).await;
    handles.shutdown().await;
    result
}

async fn build_storage(config: &AppConfig) -> Result<StorageHandles, Box<dyn std::error::Error>> {
    let db_url = config.database.connection_url();
    ensure_parent_dir(&db_url)?;

    tracing::debug!(
        max_connections = config.database.max_connections,
        "Initializing storage"
    );

    let handles = StorageBuilder::new(db_url)
        .pool_settings(config.database.pool_settings())
        .statements(config.statements.to_statements()?)
        .init_schema(config.database.init_schema)
        .build()
        .await?;
    Ok(handles)
}

/// Create the directory of a file-backed SQLite URL if it is missing.
fn ensure_parent_dir(db_url: &str) -> std::io::Result<()> {
    let path = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

async fn run(command: Command, handles: &StorageHandles) -> Result<(), Box<dyn std::error::Error>> {
    let store = &handles.customer_store;

    match command {
        Command::Init => {
            handles.init_schema().await?;
            println!("schema ready");
        }
        Command::Add {
            account_no,
            first_name,
            middle_name,
            last_name,
            email,
            password,
            contact_no,
        } => {
            let customer = Customer::new(
                account_no,
                FullName::new(first_name, middle_name.as_deref(), last_name),
                email,
                password,
                contact_no,
            );
            let added = store.create(&customer).await?;
            println!("{}", if added { "customer added" } else { "customer not added" });
        }
        Command::Get { account_no } => {
            let customer = store.get_by_id(account_no).await?;
            println!("{}", serde_json::to_string_pretty(&customer)?);
        }
        Command::List => {
            let customers = store.get_all().await?;
            println!("{}", serde_json::to_string_pretty(&customers)?);
        }
        Command::UpdateContact {
            account_no,
            contact_no,
        } => {
            let updated = store.update_contact_no(account_no, contact_no).await?;
            println!("{}", if updated { "contact updated" } else { "no such customer" });
        }
        Command::Delete { account_no } => {
            let deleted = store.delete(account_no).await?;
            println!("{}", if deleted { "customer deleted" } else { "no such customer" });
        }
        Command::Demo => {
            let report = demo::run_demo(store, &mut rand::thread_rng()).await?;
            println!(
                "{} {} ({})",
                if report.inserted { "Added" } else { "Failed to add" },
                report.generated.name,
                report.generated.account_no
            );
            match report.picked {
                Some(customer) => {
                    println!("Fetched random customer out of {}:", report.total);
                    println!("{}", serde_json::to_string_pretty(&customer)?);
                }
                None => println!("No customers found; nothing to pick."),
            }
        }
    }

    Ok(())
}
