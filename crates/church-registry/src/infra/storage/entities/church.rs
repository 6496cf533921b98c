use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "churches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub section_id: i32,
    pub church_name: String,
    pub location: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Section,
    #[sea_orm(has_many = "super::church_pastor::Entity")]
    ChurchPastors,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::church_pastor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChurchPastors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
