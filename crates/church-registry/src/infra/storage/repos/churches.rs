use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::DateTimeUtc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    TransactionTrait,
};

use crate::domain::error::DomainError;
use crate::domain::model::{Church, ChurchPatch, NewChurch};
use crate::domain::query::ChurchQuery;
use crate::domain::repos::ChurchesRepository;
use crate::infra::storage::entities::{church, section};
use crate::infra::storage::repos::{icontains, sort_order};

#[derive(Debug, FromQueryResult)]
struct ChurchRow {
    id: i32,
    section_id: i32,
    church_name: String,
    location: Option<String>,
    created_at: DateTimeUtc,
    updated_at: DateTimeUtc,
    section_name: String,
}

impl From<ChurchRow> for Church {
    fn from(row: ChurchRow) -> Self {
        Self {
            id: row.id,
            section_id: row.section_id,
            section_name: row.section_name,
            church_name: row.church_name,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct SeaOrmChurchesRepository {
    db: DatabaseConnection,
}

impl SeaOrmChurchesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select_with_section() -> Select<church::Entity> {
        church::Entity::find()
            .join(JoinType::InnerJoin, church::Relation::Section.def())
            .column_as(section::Column::Name, "section_name")
    }

    async fn fetch(&self, id: i32) -> Result<Option<Church>, DomainError> {
        let row = Self::select_with_section()
            .filter(church::Column::Id.eq(id))
            .into_model::<ChurchRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl ChurchesRepository for SeaOrmChurchesRepository {
    async fn list(&self, query: &ChurchQuery) -> Result<Vec<Church>, DomainError> {
        let mut select = Self::select_with_section();
        if let Some(section_id) = query.section_id {
            select = select.filter(church::Column::SectionId.eq(section_id));
        }
        if let Some(church_name) = &query.church_name {
            select = select.filter(church::Column::ChurchName.eq(church_name.as_str()));
        }
        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(icontains(
                        (church::Entity, church::Column::ChurchName),
                        term,
                    ))
                    .add(icontains((church::Entity, church::Column::Location), term)),
            );
        }
        select = match &query.ordering {
            Some(ordering) => {
                let column = match ordering.field {
                    "created_at" => church::Column::CreatedAt,
                    _ => church::Column::ChurchName,
                };
                select.order_by(column, sort_order(ordering.direction))
            }
            None => select.order_by_asc(church::Column::ChurchName),
        };
        let rows = select.into_model::<ChurchRow>().all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Church>, DomainError> {
        self.fetch(id).await
    }

    async fn create(&self, new: NewChurch) -> Result<Church, DomainError> {
        let now = Utc::now();
        let model = church::ActiveModel {
            section_id: Set(new.section_id),
            church_name: Set(new.church_name),
            location: Set(new.location),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::storage("church", e))?;
        self.fetch(model.id)
            .await?
            .ok_or_else(|| DomainError::Database(sea_orm::DbErr::RecordNotFound(
                "church vanished after insert".to_owned(),
            )))
    }

    async fn create_many(&self, items: Vec<NewChurch>) -> Result<Vec<Church>, DomainError> {
        let txn = self.db.begin().await?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let now = Utc::now();
            let model = church::ActiveModel {
                section_id: Set(item.section_id),
                church_name: Set(item.church_name),
                location: Set(item.location),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::storage("church", e))?;
            ids.push(model.id);
        }
        txn.commit().await?;

        let rows = Self::select_with_section()
            .filter(church::Column::Id.is_in(ids.clone()))
            .into_model::<ChurchRow>()
            .all(&self.db)
            .await?;
        let mut by_id: HashMap<i32, Church> =
            rows.into_iter().map(|row| (row.id, row.into())).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn update(&self, id: i32, data: NewChurch) -> Result<Option<Church>, DomainError> {
        let Some(existing) = church::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: church::ActiveModel = existing.into();
        active.section_id = Set(data.section_id);
        active.church_name = Set(data.church_name);
        active.location = Set(data.location);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("church", e))?;
        self.fetch(model.id).await
    }

    async fn patch(&self, id: i32, patch: ChurchPatch) -> Result<Option<Church>, DomainError> {
        let Some(existing) = church::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: church::ActiveModel = existing.into();
        if let Some(section_id) = patch.section_id {
            active.section_id = Set(section_id);
        }
        if let Some(church_name) = patch.church_name {
            active.church_name = Set(church_name);
        }
        if let Some(location) = patch.location {
            active.location = Set(Some(location));
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("church", e))?;
        self.fetch(model.id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = church::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_district(&self, district_id: i32) -> Result<u64, DomainError> {
        let count = church::Entity::find()
            .join(JoinType::InnerJoin, church::Relation::Section.def())
            .filter(section::Column::DistrictId.eq(district_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
