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
use crate::domain::fields::RoleName;
use crate::domain::model::{ChurchPastor, ChurchPastorPatch, NewChurchPastor};
use crate::domain::query::ChurchPastorQuery;
use crate::domain::repos::ChurchPastorsRepository;
use crate::infra::storage::entities::{church, church_pastor, church_role, pastor};
use crate::infra::storage::repos::{icontains, sort_order};

#[derive(Debug, FromQueryResult)]
struct AssignmentRow {
    id: i32,
    church_id: i32,
    pastor_id: i32,
    role_id: i32,
    created_at: DateTimeUtc,
    updated_at: DateTimeUtc,
    church_name: String,
    pastor_name: String,
    role_name: RoleName,
}

impl From<AssignmentRow> for ChurchPastor {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: row.id,
            church_id: row.church_id,
            pastor_id: row.pastor_id,
            role_id: row.role_id,
            church_name: row.church_name,
            pastor_name: row.pastor_name,
            role_name: row.role_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct SeaOrmChurchPastorsRepository {
    db: DatabaseConnection,
}

impl SeaOrmChurchPastorsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Base select resolving church, pastor and role display names.
    fn select_with_names() -> Select<church_pastor::Entity> {
        church_pastor::Entity::find()
            .join(JoinType::InnerJoin, church_pastor::Relation::Church.def())
            .join(JoinType::InnerJoin, church_pastor::Relation::Pastor.def())
            .join(JoinType::InnerJoin, church_pastor::Relation::Role.def())
            .column_as(church::Column::ChurchName, "church_name")
            .column_as(pastor::Column::FullName, "pastor_name")
            .column_as(church_role::Column::RoleName, "role_name")
    }

    async fn fetch(&self, id: i32) -> Result<Option<ChurchPastor>, DomainError> {
        let row = Self::select_with_names()
            .filter(church_pastor::Column::Id.eq(id))
            .into_model::<AssignmentRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl ChurchPastorsRepository for SeaOrmChurchPastorsRepository {
    async fn list(&self, query: &ChurchPastorQuery) -> Result<Vec<ChurchPastor>, DomainError> {
        let mut select = Self::select_with_names();
        if let Some(church_id) = query.church_id {
            select = select.filter(church_pastor::Column::ChurchId.eq(church_id));
        }
        if let Some(pastor_id) = query.pastor_id {
            select = select.filter(church_pastor::Column::PastorId.eq(pastor_id));
        }
        if let Some(role_id) = query.role_id {
            select = select.filter(church_pastor::Column::RoleId.eq(role_id));
        }
        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(icontains(
                        (church::Entity, church::Column::ChurchName),
                        term,
                    ))
                    .add(icontains((pastor::Entity, pastor::Column::FullName), term))
                    .add(icontains(
                        (church_role::Entity, church_role::Column::RoleName),
                        term,
                    )),
            );
        }
        select = match &query.ordering {
            Some(ordering) => select.order_by(
                church_pastor::Column::CreatedAt,
                sort_order(ordering.direction),
            ),
            None => select
                .order_by_asc(church_pastor::Column::ChurchId)
                .order_by_asc(church_pastor::Column::PastorId),
        };
        let rows = select.into_model::<AssignmentRow>().all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<ChurchPastor>, DomainError> {
        self.fetch(id).await
    }

    async fn create(&self, new: NewChurchPastor) -> Result<ChurchPastor, DomainError> {
        let now = Utc::now();
        let model = church_pastor::ActiveModel {
            church_id: Set(new.church_id),
            pastor_id: Set(new.pastor_id),
            role_id: Set(new.role_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::storage("church pastor assignment", e))?;
        self.fetch(model.id)
            .await?
            .ok_or_else(|| DomainError::Database(sea_orm::DbErr::RecordNotFound(
                "assignment vanished after insert".to_owned(),
            )))
    }

    async fn create_many(
        &self,
        items: Vec<NewChurchPastor>,
    ) -> Result<Vec<ChurchPastor>, DomainError> {
        let txn = self.db.begin().await?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let now = Utc::now();
            let model = church_pastor::ActiveModel {
                church_id: Set(item.church_id),
                pastor_id: Set(item.pastor_id),
                role_id: Set(item.role_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::storage("church pastor assignment", e))?;
            ids.push(model.id);
        }
        txn.commit().await?;

        let rows = Self::select_with_names()
            .filter(church_pastor::Column::Id.is_in(ids.clone()))
            .into_model::<AssignmentRow>()
            .all(&self.db)
            .await?;
        let mut by_id: HashMap<i32, ChurchPastor> =
            rows.into_iter().map(|row| (row.id, row.into())).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn update(
        &self,
        id: i32,
        data: NewChurchPastor,
    ) -> Result<Option<ChurchPastor>, DomainError> {
        let Some(existing) = church_pastor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: church_pastor::ActiveModel = existing.into();
        active.church_id = Set(data.church_id);
        active.pastor_id = Set(data.pastor_id);
        active.role_id = Set(data.role_id);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("church pastor assignment", e))?;
        self.fetch(model.id).await
    }

    async fn patch(
        &self,
        id: i32,
        patch: ChurchPastorPatch,
    ) -> Result<Option<ChurchPastor>, DomainError> {
        let Some(existing) = church_pastor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: church_pastor::ActiveModel = existing.into();
        if let Some(church_id) = patch.church_id {
            active.church_id = Set(church_id);
        }
        if let Some(pastor_id) = patch.pastor_id {
            active.pastor_id = Set(pastor_id);
        }
        if let Some(role_id) = patch.role_id {
            active.role_id = Set(role_id);
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::storage("church pastor assignment", e))?;
        self.fetch(model.id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = church_pastor::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_church(&self, church_id: i32) -> Result<Vec<ChurchPastor>, DomainError> {
        let query = ChurchPastorQuery {
            church_id: Some(church_id),
            ..Default::default()
        };
        self.list(&query).await
    }

    async fn count_by_role(&self, role_id: i32) -> Result<u64, DomainError> {
        let count = church_pastor::Entity::find()
            .filter(church_pastor::Column::RoleId.eq(role_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
