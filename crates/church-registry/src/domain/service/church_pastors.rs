use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};
use crate::domain::model::{ChurchPastor, ChurchPastorPatch, NewChurchPastor};
use crate::domain::query::{ChurchPastorQuery, Ordering};
use crate::domain::repos::{
    ChurchPastorsRepository, ChurchRolesRepository, ChurchesRepository, PastorsRepository,
};
use crate::domain::service::{
    check_bulk_shape, count_recent, grouped_counts, oldest_and_newest, prefix_violations,
    require_id,
};

pub const ORDERING_FIELDS: &[&str] = &["created_at"];
pub const MAX_BULK_CREATE: usize = 1000;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChurchPastorPayload {
    pub church: Option<i32>,
    pub pastor: Option<i32>,
    pub role: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChurchPastorListParams {
    pub church: Option<i32>,
    pub pastor: Option<i32>,
    pub role: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleAssignmentCount {
    pub role_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchPastorStatistics {
    pub total_assignments: u64,
    pub recent_assignments: u64,
    pub assignments_by_role: Vec<RoleAssignmentCount>,
    pub oldest_assignment: Option<String>,
    pub newest_assignment: Option<String>,
}

pub struct ChurchPastorsService {
    assignments: Arc<dyn ChurchPastorsRepository>,
    churches: Arc<dyn ChurchesRepository>,
    pastors: Arc<dyn PastorsRepository>,
    roles: Arc<dyn ChurchRolesRepository>,
}

impl ChurchPastorsService {
    pub fn new(
        assignments: Arc<dyn ChurchPastorsRepository>,
        churches: Arc<dyn ChurchesRepository>,
        pastors: Arc<dyn PastorsRepository>,
        roles: Arc<dyn ChurchRolesRepository>,
    ) -> Self {
        Self {
            assignments,
            churches,
            pastors,
            roles,
        }
    }

    fn build_query(params: ChurchPastorListParams) -> Result<ChurchPastorQuery, DomainError> {
        let ordering = params
            .ordering
            .as_deref()
            .map(|raw| Ordering::parse(raw, ORDERING_FIELDS))
            .transpose()?;
        Ok(ChurchPastorQuery {
            church_id: params.church,
            pastor_id: params.pastor,
            role_id: params.role,
            search: params.search,
            ordering,
        })
    }

    /// Validates presence of the three references and that each points at an
    /// existing row.
    async fn validate(
        &self,
        payload: &ChurchPastorPayload,
    ) -> Result<NewChurchPastor, Vec<Violation>> {
        let mut violations = Vec::new();
        let church_id = require_id(&mut violations, "church", payload.church);
        let pastor_id = require_id(&mut violations, "pastor", payload.pastor);
        let role_id = require_id(&mut violations, "role", payload.role);

        if let Some(id) = church_id {
            match self.churches.get(id).await {
                Ok(Some(_)) => {}
                Ok(None) => violations.push(Violation::new(
                    "church",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "church",
                    "Could not verify the referenced church.",
                )),
            }
        }
        if let Some(id) = pastor_id {
            match self.pastors.get(id).await {
                Ok(Some(_)) => {}
                Ok(None) => violations.push(Violation::new(
                    "pastor",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "pastor",
                    "Could not verify the referenced pastor.",
                )),
            }
        }
        if let Some(id) = role_id {
            match self.roles.get(id).await {
                Ok(Some(_)) => {}
                Ok(None) => violations.push(Violation::new(
                    "role",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "role",
                    "Could not verify the referenced role.",
                )),
            }
        }

        match (church_id, pastor_id, role_id) {
            (Some(church_id), Some(pastor_id), Some(role_id)) if violations.is_empty() => {
                Ok(NewChurchPastor {
                    church_id,
                    pastor_id,
                    role_id,
                })
            }
            _ => Err(violations),
        }
    }

    pub async fn list(
        &self,
        params: ChurchPastorListParams,
    ) -> Result<Vec<ChurchPastor>, DomainError> {
        self.assignments.list(&Self::build_query(params)?).await
    }

    pub async fn get(&self, id: i32) -> Result<ChurchPastor, DomainError> {
        self.assignments
            .get(id)
            .await?
            .ok_or(DomainError::NotFound("church pastor assignment"))
    }

    pub async fn create(
        &self,
        payload: ChurchPastorPayload,
    ) -> Result<ChurchPastor, DomainError> {
        let new = self
            .validate(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.assignments.create(new).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: ChurchPastorPayload,
    ) -> Result<ChurchPastor, DomainError> {
        let data = self
            .validate(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.assignments
            .update(id, data)
            .await?
            .ok_or(DomainError::NotFound("church pastor assignment"))
    }

    pub async fn patch(
        &self,
        id: i32,
        payload: ChurchPastorPayload,
    ) -> Result<ChurchPastor, DomainError> {
        let mut violations = Vec::new();
        let mut patch = ChurchPastorPatch::default();
        if let Some(church_id) = payload.church {
            match self.churches.get(church_id).await {
                Ok(Some(_)) => patch.church_id = Some(church_id),
                Ok(None) => violations.push(Violation::new(
                    "church",
                    format!("Invalid pk \"{church_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "church",
                    "Could not verify the referenced church.",
                )),
            }
        }
        if let Some(pastor_id) = payload.pastor {
            match self.pastors.get(pastor_id).await {
                Ok(Some(_)) => patch.pastor_id = Some(pastor_id),
                Ok(None) => violations.push(Violation::new(
                    "pastor",
                    format!("Invalid pk \"{pastor_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "pastor",
                    "Could not verify the referenced pastor.",
                )),
            }
        }
        if let Some(role_id) = payload.role {
            match self.roles.get(role_id).await {
                Ok(Some(_)) => patch.role_id = Some(role_id),
                Ok(None) => violations.push(Violation::new(
                    "role",
                    format!("Invalid pk \"{role_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "role",
                    "Could not verify the referenced role.",
                )),
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.assignments
            .patch(id, patch)
            .await?
            .ok_or(DomainError::NotFound("church pastor assignment"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.assignments.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("church pastor assignment"))
        }
    }

    pub async fn statistics(&self) -> Result<ChurchPastorStatistics, DomainError> {
        let snapshot = self.assignments.list(&ChurchPastorQuery::default()).await?;
        let (oldest_assignment, newest_assignment) =
            oldest_and_newest(&snapshot, |a| a.created_at, ChurchPastor::describe);
        let assignments_by_role =
            grouped_counts(&snapshot, |a| a.role_name.as_str().to_owned())
                .into_iter()
                .map(|(role_name, count)| RoleAssignmentCount { role_name, count })
                .collect();
        Ok(ChurchPastorStatistics {
            total_assignments: snapshot.len() as u64,
            recent_assignments: count_recent(&snapshot, |a| a.created_at),
            assignments_by_role,
            oldest_assignment,
            newest_assignment,
        })
    }

    pub async fn summary(&self, id: i32) -> Result<ChurchPastor, DomainError> {
        self.get(id).await
    }

    pub async fn bulk_create(
        &self,
        items: Vec<ChurchPastorPayload>,
    ) -> Result<Vec<ChurchPastor>, DomainError> {
        check_bulk_shape("church_pastors", items.len(), MAX_BULK_CREATE)?;
        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.validate(item).await {
                Ok(new) => validated.push(new),
                Err(item_violations) => {
                    violations.extend(prefix_violations("church_pastors", index, item_violations));
                }
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.assignments.create_many(validated).await
    }
}
