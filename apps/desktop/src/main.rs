mod view;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use client_core::{config::DEFAULT_CONFIG_FILE, load_settings, CommissionApp, Roster, WalletConnector};
use shared::domain::{ArtistId, DraftField};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Print the final application snapshot as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the artists open for commissions.
    Roster,
    /// Authorize an account in the configured wallet.
    Connect,
    /// Connect, fill in the commission form for an artist and submit it.
    Commission {
        #[arg(long)]
        artist: u32,
        /// Form field as name=value (title, description, reference_url). Repeatable.
        #[arg(long = "set", value_parser = view::parse_field_assignment)]
        fields: Vec<(DraftField, String)>,
    },
    /// Print the effective settings as TOML.
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), chain_id = settings.chain_id, "settings loaded");

    match cli.command {
        Command::Roster => view::print_roster(&Roster::fixed()),
        Command::PrintConfig => print!("{}", settings.to_toml()?),
        Command::Connect => {
            let connector = WalletConnector::new(settings.wallet_provider()?);
            match connector.connect().await {
                Ok(account) => println!("{}", view::connected_label(&account)),
                Err(err) => bail!(view::describe_failure(&err)),
            }
        }
        Command::Commission { artist, fields } => {
            let roster = Roster::fixed();
            let artist = roster
                .get(ArtistId(artist))
                .ok_or_else(|| anyhow!("unknown artist {artist}"))?;

            let app = CommissionApp::new(settings.wallet_provider()?, settings.contract_config()?);
            let account = app
                .connect_wallet()
                .await
                .map_err(|err| anyhow!(view::describe_failure(&err)))?;
            println!("{}", view::connected_label(&account));

            println!("Commission {}", artist.name);
            app.open_commission(artist.id).await;
            for (field, value) in fields {
                app.update_field(field, value).await;
            }

            let mut states = app.watch_submission().await;
            let progress = tokio::spawn(async move {
                while states.changed().await.is_ok() {
                    let line = view::submission_line(&states.borrow_and_update());
                    if let Some(line) = line {
                        println!("{line}");
                    }
                }
            });

            let result = app.submit_commission().await;
            progress.abort();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&app.snapshot().await)?);
            }
            match result {
                Ok(receipt) => println!("{}", view::confirmed_line(&receipt)),
                Err(err) => bail!(view::describe_failure(&err)),
            }
        }
    }

    Ok(())
}
