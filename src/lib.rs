pub mod advisory;
pub mod cli_args;
pub mod command_handler;
pub mod configuration;
pub mod discord_gateway;
pub mod exchange_client;
pub mod exchange_model;
pub mod reply;
pub mod reqwest_helpers;
pub mod valuation;
