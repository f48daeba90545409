use anyhow::Result;
use clap::Parser;
use customer_registry::config::{AppConfig, StorageConfig};
use customer_registry::server::ServerBuilder;
use customer_registry::storage::InMemoryCustomerStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Customer registry REST server
#[derive(Parser)]
#[command(name = "customer-registry")]
#[command(about = "Customer registry REST server", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_overrides(|key| std::env::var(key).ok())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.print_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let builder = ServerBuilder::new().with_lookup_settings(config.lookup.settings());

    let builder = match &config.storage {
        StorageConfig::InMemory => {
            tracing::info!("Using in-memory customer store");
            builder.with_store(InMemoryCustomerStore::new())
        }
        #[cfg(feature = "postgres")]
        StorageConfig::Postgres { url } => {
            use customer_registry::storage::PostgresCustomerStore;

            tracing::info!("Using PostgreSQL customer store");
            builder.with_store(PostgresCustomerStore::connect(url).await?)
        }
        #[cfg(not(feature = "postgres"))]
        StorageConfig::Postgres { .. } => {
            anyhow::bail!("PostgreSQL storage requested but the `postgres` feature is disabled")
        }
    };

    builder.serve(&config.server.listen_addr()).await
}
