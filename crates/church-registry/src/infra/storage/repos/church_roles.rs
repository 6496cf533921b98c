use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::domain::error::DomainError;
use crate::domain::model::{ChurchRole, ChurchRolePatch, NewChurchRole};
use crate::domain::query::ChurchRoleQuery;
use crate::domain::repos::ChurchRolesRepository;
use crate::infra::storage::entities::church_role;
use crate::infra::storage::repos::{icontains, sort_order};

pub struct SeaOrmChurchRolesRepository {
    db: DatabaseConnection,
}

impl SeaOrmChurchRolesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChurchRolesRepository for SeaOrmChurchRolesRepository {
    async fn list(&self, query: &ChurchRoleQuery) -> Result<Vec<ChurchRole>, DomainError> {
        let mut select = church_role::Entity::find();
        if let Some(role_name) = query.role_name {
            select = select.filter(church_role::Column::RoleName.eq(role_name));
        }
        if let Some(term) = &query.search {
            select = select.filter(icontains(
                (church_role::Entity, church_role::Column::RoleName),
                term,
            ));
        }
        select = match &query.ordering {
            Some(ordering) => {
                let column = match ordering.field {
                    "created_at" => church_role::Column::CreatedAt,
                    _ => church_role::Column::RoleName,
                };
                select.order_by(column, sort_order(ordering.direction))
            }
            None => select.order_by_asc(church_role::Column::RoleName),
        };
        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<ChurchRole>, DomainError> {
        let row = church_role::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, new: NewChurchRole) -> Result<ChurchRole, DomainError> {
        let now = Utc::now();
        let model = church_role::ActiveModel {
            role_name: Set(new.role_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::storage("church role", e))?;
        Ok(model.into())
    }

    async fn create_many(
        &self,
        items: Vec<NewChurchRole>,
    ) -> Result<Vec<ChurchRole>, DomainError> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let now = Utc::now();
            let model = church_role::ActiveModel {
                role_name: Set(item.role_name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::storage("church role", e))?;
            created.push(model.into());
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        data: NewChurchRole,
    ) -> Result<Option<ChurchRole>, DomainError> {
        let Some(existing) = church_role::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: church_role::ActiveModel = existing.into();
        active.role_name = Set(data.role_name);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("church role", e))?;
        Ok(Some(model.into()))
    }

    async fn patch(
        &self,
        id: i32,
        patch: ChurchRolePatch,
    ) -> Result<Option<ChurchRole>, DomainError> {
        let Some(existing) = church_role::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: church_role::ActiveModel = existing.into();
        if let Some(role_name) = patch.role_name {
            active.role_name = Set(role_name);
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("church role", e))?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = church_role::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
