use crate::cli_args::Commands;

#[derive(Clone, Debug)]
pub struct BotConfiguration {
    pub discord_bot_token: String,
    pub exchange_api_url: String,
}

impl BotConfiguration {
    pub fn new(commands: Commands) -> Self {
        match commands {
            Commands::RunBot {
                discord_bot_token,
                exchange_api_url,
            } => Self {
                discord_bot_token,
                exchange_api_url,
            },
        }
    }
}
