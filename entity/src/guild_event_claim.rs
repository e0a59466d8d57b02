use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_event_claim")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub claimed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guild_event::Entity",
        from = "Column::EventId",
        to = "super::guild_event::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GuildEvent,
}

impl Related<super::guild_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuildEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
