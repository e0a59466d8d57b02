//! Discord bot integration.
//!
//! The bot turns gateway events into collector, XP and claim-event work. Outbound
//! calls never go through the event `Context`; everything uses the
//! [`gateway::ChatGateway`] held in the application state, so the same code paths
//! run against a recording gateway in tests.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability
//! - `GUILD_MESSAGES` - New submissions and XP
//! - `GUILD_MESSAGE_REACTIONS` - Moderator decisions and reward reactions
//! - `MESSAGE_CONTENT` - Telling text submissions from empty ones (privileged intent)
//! - `GUILD_MEMBERS` - Member role lookups (privileged intent)
//!
//! Privileged intents must be enabled in the Discord Developer Portal.

pub mod gateway;
pub mod handler;
pub mod start;
