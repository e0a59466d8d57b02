use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i32,
    pub count: i32,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leyline_user::Entity",
        from = "Column::Uid",
        to = "super::leyline_user::Column::Uid",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    LeylineUser,
}

impl Related<super::leyline_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeylineUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
