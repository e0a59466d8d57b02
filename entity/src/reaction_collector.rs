use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reaction_collector")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub message_id: String,
    pub collector_type: String,
    pub channel_id: String,
    pub author_id: String,
    pub approved: bool,
    pub expires: DateTimeUtc,
    pub approved_by: Option<String>,
    pub approved_on: Option<DateTimeUtc>,
    pub rejected_by: Option<String>,
    pub metadata: Option<Json>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reacted_user::Entity")]
    ReactedUser,
}

impl Related<super::reacted_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReactedUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
