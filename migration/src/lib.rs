pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_leyline_user_table;
mod m20260901_000002_create_leyline_points_table;
mod m20260901_000003_create_inventory_item_table;
mod m20260901_000004_create_reaction_collector_table;
mod m20260901_000005_create_reacted_user_table;
mod m20260901_000006_create_bot_config_table;
mod m20260901_000007_create_scheduled_task_table;
mod m20260901_000008_create_punishment_table;
mod m20260901_000009_create_user_xp_table;
mod m20260901_000010_create_guild_event_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_leyline_user_table::Migration),
            Box::new(m20260901_000002_create_leyline_points_table::Migration),
            Box::new(m20260901_000003_create_inventory_item_table::Migration),
            Box::new(m20260901_000004_create_reaction_collector_table::Migration),
            Box::new(m20260901_000005_create_reacted_user_table::Migration),
            Box::new(m20260901_000006_create_bot_config_table::Migration),
            Box::new(m20260901_000007_create_scheduled_task_table::Migration),
            Box::new(m20260901_000008_create_punishment_table::Migration),
            Box::new(m20260901_000009_create_user_xp_table::Migration),
            Box::new(m20260901_000010_create_guild_event_tables::Migration),
        ]
    }
}
