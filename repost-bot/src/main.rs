//! repost-bot entry point.

use anyhow::Result;
use clap::Parser;
use repost_bot::{describe_catalog, load_catalog, run_bot, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, polling } => {
            let config = BotConfig::load(token)?;
            run_bot(config, polling).await
        }
        Commands::Styles => {
            let styles_file = std::env::var("STYLES_FILE").ok();
            let catalog = load_catalog(styles_file.as_deref())?;
            println!("{}", describe_catalog(&catalog));
            Ok(())
        }
    }
}
