//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repost-bot")]
#[command(about = "Rewrites web articles as Telegram posts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Use long polling even when WEBHOOK_URL is set.
        #[arg(long)]
        polling: bool,
    },
    /// Print the style catalog (built-in or STYLES_FILE) and exit.
    Styles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_overrides() {
        let cli = Cli::try_parse_from(["repost-bot", "run", "--token", "t", "--polling"]).unwrap();
        match cli.command {
            Commands::Run { token, polling } => {
                assert_eq!(token.as_deref(), Some("t"));
                assert!(polling);
            }
            Commands::Styles => panic!("expected run"),
        }
    }

    #[test]
    fn parses_styles() {
        let cli = Cli::try_parse_from(["repost-bot", "styles"]).unwrap();
        assert!(matches!(cli.command, Commands::Styles));
        assert!(Cli::try_parse_from(["repost-bot"]).is_err());
    }
}
