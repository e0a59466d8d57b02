use sea_orm::entity::prelude::*;

/// A web-app account linked to a Discord user, with its point balance snapshot.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leyline_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    #[sea_orm(unique)]
    pub discord_id: String,
    pub username: String,
    pub total_points: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::leyline_points::Entity")]
    LeylinePoints,
    #[sea_orm(has_many = "super::inventory_item::Entity")]
    InventoryItem,
}

impl Related<super::leyline_points::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeylinePoints.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
