use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::domain::error::DomainError;
use crate::domain::model::{NewPastor, Pastor, PastorPatch};
use crate::domain::query::PastorQuery;
use crate::domain::repos::PastorsRepository;
use crate::infra::storage::entities::pastor;
use crate::infra::storage::repos::{icontains, sort_order};

pub struct SeaOrmPastorsRepository {
    db: DatabaseConnection,
}

impl SeaOrmPastorsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active_model_from(new: NewPastor) -> pastor::ActiveModel {
        let now = Utc::now();
        pastor::ActiveModel {
            full_name: Set(new.full_name),
            gender: Set(new.gender),
            pastor_rank: Set(new.pastor_rank),
            national_id: Set(new.national_id),
            date_of_birth: Set(new.date_of_birth),
            phone_number: Set(new.phone_number),
            start_of_service: Set(new.start_of_service),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PastorsRepository for SeaOrmPastorsRepository {
    async fn list(&self, query: &PastorQuery) -> Result<Vec<Pastor>, DomainError> {
        let mut select = pastor::Entity::find();
        if let Some(gender) = query.gender {
            select = select.filter(pastor::Column::Gender.eq(gender));
        }
        if let Some(rank) = query.pastor_rank {
            select = select.filter(pastor::Column::PastorRank.eq(rank));
        }
        if let Some(status) = query.status {
            select = select.filter(pastor::Column::Status.eq(status));
        }
        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(icontains((pastor::Entity, pastor::Column::FullName), term))
                    .add(icontains(
                        (pastor::Entity, pastor::Column::NationalId),
                        term,
                    ))
                    .add(icontains(
                        (pastor::Entity, pastor::Column::PhoneNumber),
                        term,
                    ))
                    .add(icontains(
                        (pastor::Entity, pastor::Column::PastorRank),
                        term,
                    )),
            );
        }
        select = match &query.ordering {
            Some(ordering) => {
                let column = match ordering.field {
                    "pastor_rank" => pastor::Column::PastorRank,
                    "date_of_birth" => pastor::Column::DateOfBirth,
                    "start_of_service" => pastor::Column::StartOfService,
                    "created_at" => pastor::Column::CreatedAt,
                    "status" => pastor::Column::Status,
                    _ => pastor::Column::FullName,
                };
                select.order_by(column, sort_order(ordering.direction))
            }
            None => select.order_by_asc(pastor::Column::FullName),
        };
        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Pastor>, DomainError> {
        let row = pastor::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, new: NewPastor) -> Result<Pastor, DomainError> {
        let model = Self::active_model_from(new)
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::storage("pastor", e))?;
        Ok(model.into())
    }

    async fn create_many(&self, items: Vec<NewPastor>) -> Result<Vec<Pastor>, DomainError> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let model = Self::active_model_from(item)
                .insert(&txn)
                .await
                .map_err(|e| DomainError::storage("pastor", e))?;
            created.push(model.into());
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i32, data: NewPastor) -> Result<Option<Pastor>, DomainError> {
        let Some(existing) = pastor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: pastor::ActiveModel = existing.into();
        active.full_name = Set(data.full_name);
        active.gender = Set(data.gender);
        active.pastor_rank = Set(data.pastor_rank);
        active.national_id = Set(data.national_id);
        active.date_of_birth = Set(data.date_of_birth);
        active.phone_number = Set(data.phone_number);
        active.start_of_service = Set(data.start_of_service);
        active.status = Set(data.status);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("pastor", e))?;
        Ok(Some(model.into()))
    }

    async fn patch(&self, id: i32, patch: PastorPatch) -> Result<Option<Pastor>, DomainError> {
        let Some(existing) = pastor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: pastor::ActiveModel = existing.into();
        if let Some(full_name) = patch.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(gender) = patch.gender {
            active.gender = Set(gender);
        }
        if let Some(pastor_rank) = patch.pastor_rank {
            active.pastor_rank = Set(pastor_rank);
        }
        if let Some(national_id) = patch.national_id {
            active.national_id = Set(Some(national_id));
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            active.date_of_birth = Set(date_of_birth);
        }
        if let Some(phone_number) = patch.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(start_of_service) = patch.start_of_service {
            active.start_of_service = Set(Some(start_of_service));
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("pastor", e))?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = pastor::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
