use sea_orm::entity::prelude::*;

use crate::domain::fields::{Gender, PastorRank, PastorStatus};
use crate::domain::model::Pastor;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pastors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub gender: Gender,
    pub pastor_rank: PastorRank,
    pub national_id: Option<String>,
    pub date_of_birth: Date,
    pub phone_number: String,
    pub start_of_service: Option<Date>,
    pub status: PastorStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::church_pastor::Entity")]
    ChurchAssignments,
}

impl Related<super::church_pastor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChurchAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Pastor {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            gender: model.gender,
            pastor_rank: model.pastor_rank,
            national_id: model.national_id,
            date_of_birth: model.date_of_birth,
            phone_number: model.phone_number,
            start_of_service: model.start_of_service,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
