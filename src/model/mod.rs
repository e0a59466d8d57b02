//! Domain models and operation-specific parameter types.
//!
//! Models are converted from SeaORM entities at the repository boundary so entity
//! types never leak into services. Snowflakes are `u64` here even though they are
//! stored as strings.

pub mod api;
pub mod guild_event;
pub mod ledger;
pub mod punishment;
pub mod reaction_collector;
pub mod scheduled_task;
pub mod settings;
pub mod xp;
