use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leyline_points")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub uid: String,
    pub leyline_points: i64,
    pub created: DateTimeUtc,
    pub metadata: Json,
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
