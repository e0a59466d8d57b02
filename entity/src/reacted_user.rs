use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reacted_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub message_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub reacted: bool,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reaction_collector::Entity",
        from = "Column::MessageId",
        to = "super::reaction_collector::Column::MessageId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ReactionCollector,
}

impl Related<super::reaction_collector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReactionCollector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
