//! Process configuration loaded from the environment.
//!
//! Only deployment wiring lives here. Everything operators tune at runtime
//! (windows, rewards, emoji, channels) lives in the bot settings document, see
//! [`crate::model::settings::BotSettings`].

use std::net::SocketAddr;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_guild_id: u64,

    pub admin_token: String,
    pub bind_address: SocketAddr,

    /// Endpoint receiving NFT mint jobs; minting is skipped when unset.
    pub mint_queue_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_guild_id: parse_var("DISCORD_GUILD_ID", required("DISCORD_GUILD_ID")?)?,
            admin_token: required("ADMIN_TOKEN")?,
            bind_address: parse_var(
                "BIND_ADDRESS",
                std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            )?,
            mint_queue_url: std::env::var("MINT_QUEUE_URL").ok(),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_var<T>(name: &str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
