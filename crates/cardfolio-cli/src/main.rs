use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardfolio_core::{AppConfig, Wallet};

mod commands;

#[derive(Parser)]
#[command(name = "cardfolio")]
#[command(author, version, about = "A terminal business-card wallet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wallet file (JSON array of saved cards); defaults to the configured
    /// wallet, then the built-in sample
    #[arg(short = 'w', long = "wallet", global = true)]
    wallet: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List the cards in the wallet
    List,
    /// Print the stack layout at a given progress
    Poses {
        /// Scroll progress in [0, 1]
        #[arg(short, long)]
        progress: f64,
        /// Index of the active card
        #[arg(short, long)]
        active: Option<usize>,
        /// Animate from the off-stage pose until the springs come to rest
        #[arg(long)]
        settle: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the flip/zoom reveal sequence once and print its timeline
    Reveal,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // The TUI owns the screen, so its logs go to a file
    let tui_mode = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui_mode)?;

    let wallet = load_wallet(cli.wallet.or_else(|| config.wallet_path()))?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, wallet).await,
        Some(Commands::List) => commands::list::run(&wallet),
        Some(Commands::Poses {
            progress,
            active,
            settle,
            json,
        }) => commands::poses::run(
            &config,
            &wallet,
            commands::poses::PoseArgs {
                progress,
                active,
                settle,
                json,
            },
        ),
        Some(Commands::Reveal) => commands::reveal::run(&config).await,
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

fn load_wallet(path: Option<PathBuf>) -> Result<Wallet> {
    match path {
        Some(path) => Wallet::load(&path)
            .with_context(|| format!("failed to load wallet from {}", path.display())),
        None => Ok(Wallet::sample()),
    }
}
