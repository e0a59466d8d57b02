//! Service layer for business logic and orchestration.
//!
//! Services sit between the Discord event handlers, the admin API and the
//! scheduler on one side and the repository layer on the other. They implement the
//! collector state machine and reward rules, coordinate several repositories inside
//! transactions, and talk to Discord only through the chat gateway.

pub mod config;
pub mod config_cache;
pub mod guild_event;
pub mod ledger;
pub mod notify;
pub mod punishment;
pub mod reaction_collector;
pub mod scheduled_task;
pub mod xp;
