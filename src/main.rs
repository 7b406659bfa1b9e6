use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serenity::all::GatewayIntents;
use serenity::Client;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use maple_exchange_bot::cli_args::{Cli, Commands};
use maple_exchange_bot::command_handler::CommandHandler;
use maple_exchange_bot::configuration::BotConfiguration;
use maple_exchange_bot::discord_gateway::ExchangeBot;
use maple_exchange_bot::exchange_client::ExchangeClient;
use maple_exchange_bot::reqwest_helpers::create_client;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    match args {
        Cli { command } => match command {
            Commands::RunBot { .. } => {
                tracing_subscriber::registry()
                    .with(fmt::layer())
                    .with(EnvFilter::from_default_env())
                    .init();

                let cfg = BotConfiguration::new(command);

                let reqwest_client_with_middleware = create_client();

                let exchange_client = ExchangeClient::new(reqwest_client_with_middleware, cfg.exchange_api_url.clone());

                let handler = CommandHandler::new(Arc::new(exchange_client));

                let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

                let mut client = Client::builder(&cfg.discord_bot_token, intents)
                    .event_handler(ExchangeBot::new(handler))
                    .await?;

                client.start().await?;

                Ok(())
            }
        },
    }
}
