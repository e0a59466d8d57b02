use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

use crate::{
    data::inventory::InventoryRepository,
    error::AppError,
    model::ledger::{DiscordReward, PointsMetadata},
    service::ledger::{mint::MintQueue, RewardLedgerService},
};

mod get_leyline_uid;
mod reward_discord_user;

async fn total_points(db: &DatabaseConnection, uid: &str) -> i64 {
    use sea_orm::EntityTrait;

    entity::prelude::LeylineUser::find_by_id(uid.to_string())
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .total_points
}
