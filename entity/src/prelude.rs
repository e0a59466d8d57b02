pub use super::bot_config::Entity as BotConfig;
pub use super::guild_event::Entity as GuildEvent;
pub use super::guild_event_claim::Entity as GuildEventClaim;
pub use super::inventory_item::Entity as InventoryItem;
pub use super::leyline_points::Entity as LeylinePoints;
pub use super::leyline_user::Entity as LeylineUser;
pub use super::punishment::Entity as Punishment;
pub use super::reacted_user::Entity as ReactedUser;
pub use super::reaction_collector::Entity as ReactionCollector;
pub use super::scheduled_task::Entity as ScheduledTask;
pub use super::user_xp::Entity as UserXp;
