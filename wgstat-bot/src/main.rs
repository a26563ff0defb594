//! wgstat-bot CLI: run the Telegram bot that reports WireGuard peer
//! statistics via the external wgstat script. Config from env and optional CLI args.

use anyhow::Result;
use clap::{Parser, Subcommand};
use wgstat_bot::{run_bot, BotConfig};

#[derive(Parser)]
#[command(name = "wgstat-bot")]
#[command(about = "Telegram bot for WireGuard peer statistics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
    }
}
