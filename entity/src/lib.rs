//! SeaORM entity models for the LeylineBot document collections.
//!
//! Each collection the bot reads or writes is a table; sub-collections are
//! tables keyed by their parent document id plus the child id.

pub mod prelude;

pub mod bot_config;
pub mod guild_event;
pub mod guild_event_claim;
pub mod inventory_item;
pub mod leyline_points;
pub mod leyline_user;
pub mod punishment;
pub mod reacted_user;
pub mod reaction_collector;
pub mod scheduled_task;
pub mod user_xp;
