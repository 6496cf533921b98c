use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};
use crate::domain::fields::RoleName;
use crate::domain::model::{ChurchRole, ChurchRolePatch, NewChurchRole};
use crate::domain::query::{ChurchRoleQuery, Ordering};
use crate::domain::repos::{ChurchPastorsRepository, ChurchRolesRepository};
use crate::domain::service::{
    check_bulk_shape, count_recent, oldest_and_newest, optional_choice, prefix_violations,
    require_choice,
};

pub const ORDERING_FIELDS: &[&str] = &["role_name", "created_at"];
pub const MAX_BULK_CREATE: usize = 10;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChurchRolePayload {
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChurchRoleListParams {
    pub role_name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchRoleStatistics {
    pub total_roles: u64,
    pub recent_roles: u64,
    pub oldest_role: Option<String>,
    pub newest_role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChurchRoleSummary {
    pub role: ChurchRole,
    pub assignments_count: u64,
}

pub struct ChurchRolesService {
    roles: Arc<dyn ChurchRolesRepository>,
    assignments: Arc<dyn ChurchPastorsRepository>,
}

impl ChurchRolesService {
    pub fn new(
        roles: Arc<dyn ChurchRolesRepository>,
        assignments: Arc<dyn ChurchPastorsRepository>,
    ) -> Self {
        Self { roles, assignments }
    }

    fn build_query(params: ChurchRoleListParams) -> Result<ChurchRoleQuery, DomainError> {
        let ordering = params
            .ordering
            .as_deref()
            .map(|raw| Ordering::parse(raw, ORDERING_FIELDS))
            .transpose()?;
        let mut violations = Vec::new();
        let role_name = optional_choice(
            &mut violations,
            "role_name",
            params.role_name.as_deref(),
            RoleName::parse,
        );
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        Ok(ChurchRoleQuery {
            role_name,
            search: params.search,
            ordering,
        })
    }

    fn validate(payload: &ChurchRolePayload) -> Result<NewChurchRole, Vec<Violation>> {
        let mut violations = Vec::new();
        let role_name = require_choice(
            &mut violations,
            "role_name",
            payload.role_name.as_deref(),
            RoleName::parse,
        );
        match role_name {
            Some(role_name) if violations.is_empty() => Ok(NewChurchRole { role_name }),
            _ => Err(violations),
        }
    }

    fn validate_patch(payload: &ChurchRolePayload) -> Result<ChurchRolePatch, Vec<Violation>> {
        let mut violations = Vec::new();
        let role_name = optional_choice(
            &mut violations,
            "role_name",
            payload.role_name.as_deref(),
            RoleName::parse,
        );
        if violations.is_empty() {
            Ok(ChurchRolePatch { role_name })
        } else {
            Err(violations)
        }
    }

    pub async fn list(
        &self,
        params: ChurchRoleListParams,
    ) -> Result<Vec<ChurchRole>, DomainError> {
        self.roles.list(&Self::build_query(params)?).await
    }

    pub async fn get(&self, id: i32) -> Result<ChurchRole, DomainError> {
        self.roles
            .get(id)
            .await?
            .ok_or(DomainError::NotFound("church role"))
    }

    pub async fn create(&self, payload: ChurchRolePayload) -> Result<ChurchRole, DomainError> {
        let new = Self::validate(&payload).map_err(DomainError::Validation)?;
        self.roles.create(new).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: ChurchRolePayload,
    ) -> Result<ChurchRole, DomainError> {
        let data = Self::validate(&payload).map_err(DomainError::Validation)?;
        self.roles
            .update(id, data)
            .await?
            .ok_or(DomainError::NotFound("church role"))
    }

    pub async fn patch(
        &self,
        id: i32,
        payload: ChurchRolePayload,
    ) -> Result<ChurchRole, DomainError> {
        let patch = Self::validate_patch(&payload).map_err(DomainError::Validation)?;
        self.roles
            .patch(id, patch)
            .await?
            .ok_or(DomainError::NotFound("church role"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.roles.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("church role"))
        }
    }

    pub async fn statistics(&self) -> Result<ChurchRoleStatistics, DomainError> {
        let snapshot = self.roles.list(&ChurchRoleQuery::default()).await?;
        let (oldest_role, newest_role) = oldest_and_newest(
            &snapshot,
            |r| r.created_at,
            |r| r.role_name.as_str().to_owned(),
        );
        Ok(ChurchRoleStatistics {
            total_roles: snapshot.len() as u64,
            recent_roles: count_recent(&snapshot, |r| r.created_at),
            oldest_role,
            newest_role,
        })
    }

    pub async fn summary(&self, id: i32) -> Result<ChurchRoleSummary, DomainError> {
        let role = self.get(id).await?;
        let assignments_count = self.assignments.count_by_role(id).await?;
        Ok(ChurchRoleSummary {
            role,
            assignments_count,
        })
    }

    pub async fn bulk_create(
        &self,
        items: Vec<ChurchRolePayload>,
    ) -> Result<Vec<ChurchRole>, DomainError> {
        check_bulk_shape("church_roles", items.len(), MAX_BULK_CREATE)?;
        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match Self::validate(item) {
                Ok(new) => validated.push(new),
                Err(item_violations) => {
                    violations.extend(prefix_violations("church_roles", index, item_violations));
                }
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.roles.create_many(validated).await
    }
}
