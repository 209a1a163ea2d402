// src/main.rs
//! Swap wallet entry point: order building, price lookups, translations and the HTTP API.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use defi_swap_wallet::api::server::SwapServer;
use defi_swap_wallet::api::swap::handler::PriceRequest;
use defi_swap_wallet::api::swap::{DexService, OrderRequest};
use defi_swap_wallet::core::config::SwapConfig;
use defi_swap_wallet::i18n::{self, Translator, Vars};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "swap_wallet")]
#[command(about = "DEX swap order builder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Server {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind the server to
        #[arg(long, default_value = "8888")]
        port: u16,
    },
    /// Build the approval/trade transactions for an order request (JSON file)
    Quote {
        #[arg(long)]
        request: PathBuf,
    },
    /// Fetch an indicative price for a price request (JSON file)
    Price {
        #[arg(long)]
        request: PathBuf,
    },
    /// Look up a translation key
    Translate {
        key: String,
        /// Language code (defaults to the configured default language)
        #[arg(long)]
        lang: Option<String>,
        /// Variable binding, `name=value`; repeatable
        #[arg(long = "var")]
        vars: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging()?;

    info!("Starting swap wallet v{}", env!("CARGO_PKG_VERSION"));

    let config = SwapConfig::load()?;
    let translator = load_translator(&config)?;

    match args.command {
        Commands::Server { host, port } => {
            let server = SwapServer::new(host, port, &config, translator)?;
            server.start().await?;
        }
        Commands::Quote { request } => {
            let request: OrderRequest = read_json(&request)?;
            let order = DexService::from_config(&config)?.get_order_details(&request).await?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        }
        Commands::Price { request } => {
            let request: PriceRequest = read_json(&request)?;
            let price = DexService::from_config(&config)?
                .get_token_price_from(
                    &request.network,
                    &request.sell_asset,
                    &request.buy_asset,
                    &request.amount,
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&price)?);
        }
        Commands::Translate { key, lang, vars } => {
            let vars = parse_vars(&vars)?;
            i18n::install(translator);
            let text = match lang {
                Some(lang) => i18n::translate(&key, &lang, vars.as_ref()),
                None => i18n::translate_raw(&key, vars.as_ref()),
            };
            println!("{}", text);
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info,h2=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Bundled catalogs plus whatever lives in the configured catalog directory.
fn load_translator(config: &SwapConfig) -> Result<Translator> {
    let mut translator = i18n::init_default_languages()?;
    if config.catalog_dir.is_dir() {
        let loaded = translator.load_dir(&config.catalog_dir)?;
        info!("Loaded catalogs from {}: {:?}", config.catalog_dir.display(), loaded);
    }
    if !translator.set_default_language(&config.default_language) {
        warn!(
            "No catalog for default_language '{}', using '{}'",
            config.default_language,
            translator.default_language()
        );
    }
    Ok(translator)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid request in {}", path.display()))
}

fn parse_vars(raw: &[String]) -> Result<Option<Vars>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut vars = Vars::new();
    for binding in raw {
        let (name, value) = binding
            .split_once('=')
            .with_context(|| format!("Variable '{}' must look like name=value", binding))?;
        vars.set(name, value);
    }
    Ok(Some(vars))
}
