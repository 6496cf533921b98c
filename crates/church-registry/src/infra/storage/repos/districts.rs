use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::domain::error::DomainError;
use crate::domain::model::{District, DistrictPatch, NewDistrict};
use crate::domain::query::DistrictQuery;
use crate::domain::repos::DistrictsRepository;
use crate::infra::storage::entities::district;
use crate::infra::storage::repos::{icontains, sort_order};

pub struct SeaOrmDistrictsRepository {
    db: DatabaseConnection,
}

impl SeaOrmDistrictsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DistrictsRepository for SeaOrmDistrictsRepository {
    async fn list(&self, query: &DistrictQuery) -> Result<Vec<District>, DomainError> {
        let mut select = district::Entity::find();
        if let Some(name) = &query.name {
            select = select.filter(district::Column::Name.eq(name.as_str()));
        }
        if let Some(term) = &query.search {
            select = select.filter(icontains(
                (district::Entity, district::Column::Name),
                term,
            ));
        }
        select = match &query.ordering {
            Some(ordering) => {
                let column = match ordering.field {
                    "created_at" => district::Column::CreatedAt,
                    "updated_at" => district::Column::UpdatedAt,
                    _ => district::Column::Name,
                };
                select.order_by(column, sort_order(ordering.direction))
            }
            None => select.order_by_asc(district::Column::Name),
        };
        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<District>, DomainError> {
        let row = district::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, new: NewDistrict) -> Result<District, DomainError> {
        let now = Utc::now();
        let model = district::ActiveModel {
            name: Set(new.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::storage("district", e))?;
        Ok(model.into())
    }

    async fn create_many(&self, items: Vec<NewDistrict>) -> Result<Vec<District>, DomainError> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let now = Utc::now();
            let model = district::ActiveModel {
                name: Set(item.name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::storage("district", e))?;
            created.push(model.into());
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i32, data: NewDistrict) -> Result<Option<District>, DomainError> {
        let Some(existing) = district::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: district::ActiveModel = existing.into();
        active.name = Set(data.name);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("district", e))?;
        Ok(Some(model.into()))
    }

    async fn patch(&self, id: i32, patch: DistrictPatch) -> Result<Option<District>, DomainError> {
        let Some(existing) = district::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: district::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("district", e))?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = district::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
