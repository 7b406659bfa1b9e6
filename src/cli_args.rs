use clap::{Parser, Subcommand};

use crate::exchange_client::DEFAULT_EXCHANGE_API_URL;

#[derive(Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// runs the bot
    RunBot {
        #[arg(long, env("DISCORD_BOT_TOKEN"))]
        discord_bot_token: String,
        #[arg(long, env("EXCHANGE_API_URL"), default_value = DEFAULT_EXCHANGE_API_URL)]
        exchange_api_url: String,
    },
}
