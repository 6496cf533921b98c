use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::DateTimeUtc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, TransactionTrait,
};

use crate::domain::error::DomainError;
use crate::domain::model::{NewSection, Section, SectionPatch};
use crate::domain::query::SectionQuery;
use crate::domain::repos::SectionsRepository;
use crate::infra::storage::entities::{district, section};
use crate::infra::storage::repos::{icontains, sort_order};

#[derive(Debug, FromQueryResult)]
struct SectionRow {
    id: i32,
    district_id: i32,
    name: String,
    created_at: DateTimeUtc,
    updated_at: DateTimeUtc,
    district_name: String,
}

impl From<SectionRow> for Section {
    fn from(row: SectionRow) -> Self {
        Self {
            id: row.id,
            district_id: row.district_id,
            district_name: row.district_name,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct SeaOrmSectionsRepository {
    db: DatabaseConnection,
}

impl SeaOrmSectionsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Base select resolving the parent district name in the same query.
    fn select_with_district() -> Select<section::Entity> {
        section::Entity::find()
            .join(JoinType::InnerJoin, section::Relation::District.def())
            .column_as(district::Column::Name, "district_name")
    }

    async fn fetch(&self, id: i32) -> Result<Option<Section>, DomainError> {
        let row = Self::select_with_district()
            .filter(section::Column::Id.eq(id))
            .into_model::<SectionRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl SectionsRepository for SeaOrmSectionsRepository {
    async fn list(&self, query: &SectionQuery) -> Result<Vec<Section>, DomainError> {
        let mut select = Self::select_with_district();
        if let Some(name) = &query.name {
            select = select.filter(section::Column::Name.eq(name.as_str()));
        }
        if let Some(district_id) = query.district_id {
            select = select.filter(section::Column::DistrictId.eq(district_id));
        }
        if let Some(term) = &query.search {
            select = select.filter(icontains((section::Entity, section::Column::Name), term));
        }
        select = match &query.ordering {
            Some(ordering) => {
                let column = match ordering.field {
                    "created_at" => section::Column::CreatedAt,
                    _ => section::Column::Name,
                };
                select.order_by(column, sort_order(ordering.direction))
            }
            None => select.order_by_asc(section::Column::Name),
        };
        let rows = select.into_model::<SectionRow>().all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Section>, DomainError> {
        self.fetch(id).await
    }

    async fn create(&self, new: NewSection) -> Result<Section, DomainError> {
        let now = Utc::now();
        let model = section::ActiveModel {
            district_id: Set(new.district_id),
            name: Set(new.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::storage("section", e))?;
        self.fetch(model.id)
            .await?
            .ok_or_else(|| DomainError::Database(sea_orm::DbErr::RecordNotFound(
                "section vanished after insert".to_owned(),
            )))
    }

    async fn create_many(&self, items: Vec<NewSection>) -> Result<Vec<Section>, DomainError> {
        let txn = self.db.begin().await?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let now = Utc::now();
            let model = section::ActiveModel {
                district_id: Set(item.district_id),
                name: Set(item.name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::storage("section", e))?;
            ids.push(model.id);
        }
        txn.commit().await?;

        let rows = Self::select_with_district()
            .filter(section::Column::Id.is_in(ids.clone()))
            .into_model::<SectionRow>()
            .all(&self.db)
            .await?;
        let mut by_id: HashMap<i32, Section> =
            rows.into_iter().map(|row| (row.id, row.into())).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn update(&self, id: i32, data: NewSection) -> Result<Option<Section>, DomainError> {
        let Some(existing) = section::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: section::ActiveModel = existing.into();
        active.district_id = Set(data.district_id);
        active.name = Set(data.name);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("section", e))?;
        self.fetch(model.id).await
    }

    async fn patch(&self, id: i32, patch: SectionPatch) -> Result<Option<Section>, DomainError> {
        let Some(existing) = section::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: section::ActiveModel = existing.into();
        if let Some(district_id) = patch.district_id {
            active.district_id = Set(district_id);
        }
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("section", e))?;
        self.fetch(model.id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = section::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_district(&self, district_id: i32) -> Result<u64, DomainError> {
        let count = section::Entity::find()
            .filter(section::Column::DistrictId.eq(district_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
