use sea_orm::entity::prelude::*;

use crate::domain::fields::RoleName;
use crate::domain::model::ChurchRole;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "church_roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub role_name: RoleName,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::church_pastor::Entity")]
    Assignments,
}

impl Related<super::church_pastor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ChurchRole {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            role_name: model.role_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
