use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use oauth_tokens::config::loader::{file_to_config, FileConfig};
use oauth_tokens::utils::logging::{self, LogLevel};
use oauth_tokens::TokenStore;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "TOKENS_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an access token, fetching it if needed
    Get {
        name: String,
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
        #[arg(long)]
        ignore_expiration: bool,
    },
    /// Force a refresh and print the refreshed record (without the token value)
    Refresh {
        name: String,
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load optional YAML config
    // -------------------------------

    let args = Args::parse();
    let file_config = match &args.config {
        Some(path) => file_to_config(path).await?,
        None => FileConfig::default(),
    };
    logging::run(file_config.logging.as_ref(), args.log_level);

    // -------------------------------
    // 2. Prepare token store
    // -------------------------------

    let store = TokenStore::from_env().await;
    store.configure(file_config.settings).await;
    for (name, token) in &file_config.tokens {
        store.manage(name, token.scopes.clone(), token.ignore_expiration).await;
    }

    // -------------------------------
    // 3. Run command
    // -------------------------------

    match args.command {
        Command::Get { name, scopes, ignore_expiration } => {
            let declared = file_config.tokens.get(&name).cloned().unwrap_or_default();
            let scopes = if scopes.is_empty() { declared.scopes } else { scopes };
            store
                .manage(&name, scopes, ignore_expiration || declared.ignore_expiration)
                .await;
            let token = store.get(&name).await?;
            println!("{}", token);
        }
        Command::Refresh { name, scopes } => {
            let declared = file_config.tokens.get(&name).cloned().unwrap_or_default();
            let scopes = if scopes.is_empty() { declared.scopes } else { scopes };
            store.manage(&name, scopes, declared.ignore_expiration).await;
            let record = store.refresh(&name).await?;
            info!("access token \"{}\" refreshed", record.name);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
