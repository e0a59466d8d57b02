use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub points: i64,
    pub max_claims: Option<i32>,
    pub expires: DateTimeUtc,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::guild_event_claim::Entity")]
    GuildEventClaim,
}

impl Related<super::guild_event_claim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuildEventClaim.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
