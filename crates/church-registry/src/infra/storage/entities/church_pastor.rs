use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "church_pastors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub church_id: i32,
    pub pastor_id: i32,
    pub role_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::church::Entity",
        from = "Column::ChurchId",
        to = "super::church::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Church,
    #[sea_orm(
        belongs_to = "super::pastor::Entity",
        from = "Column::PastorId",
        to = "super::pastor::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Pastor,
    #[sea_orm(
        belongs_to = "super::church_role::Entity",
        from = "Column::RoleId",
        to = "super::church_role::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::church::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Church.def()
    }
}

impl Related<super::pastor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pastor.def()
    }
}

impl Related<super::church_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
