use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};
use crate::domain::model::{Church, ChurchPastor, ChurchPatch, NewChurch};
use crate::domain::query::{ChurchQuery, Ordering};
use crate::domain::repos::{ChurchPastorsRepository, ChurchesRepository, SectionsRepository};
use crate::domain::service::{
    check_bulk_shape, count_recent, oldest_and_newest, optional_text, prefix_violations,
    require_id, require_text,
};

pub const ORDERING_FIELDS: &[&str] = &["church_name", "created_at"];
pub const MAX_BULK_CREATE: usize = 100;
const CHURCH_NAME_MAX_LEN: usize = 150;
const LOCATION_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChurchPayload {
    /// Parent section primary key.
    pub section: Option<i32>,
    pub church_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChurchListParams {
    pub section: Option<i32>,
    pub church_name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchStatistics {
    pub total_churches: u64,
    pub recent_churches: u64,
    pub oldest_church: Option<String>,
    pub newest_church: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChurchSummary {
    pub church: Church,
    pub assignments: Vec<ChurchPastor>,
}

pub struct ChurchesService {
    churches: Arc<dyn ChurchesRepository>,
    sections: Arc<dyn SectionsRepository>,
    assignments: Arc<dyn ChurchPastorsRepository>,
}

impl ChurchesService {
    pub fn new(
        churches: Arc<dyn ChurchesRepository>,
        sections: Arc<dyn SectionsRepository>,
        assignments: Arc<dyn ChurchPastorsRepository>,
    ) -> Self {
        Self {
            churches,
            sections,
            assignments,
        }
    }

    fn build_query(params: ChurchListParams) -> Result<ChurchQuery, DomainError> {
        let ordering = params
            .ordering
            .as_deref()
            .map(|raw| Ordering::parse(raw, ORDERING_FIELDS))
            .transpose()?;
        Ok(ChurchQuery {
            section_id: params.section,
            church_name: params.church_name,
            search: params.search,
            ordering,
        })
    }

    async fn validate(&self, payload: &ChurchPayload) -> Result<NewChurch, Vec<Violation>> {
        let mut violations = Vec::new();
        let church_name = require_text(
            &mut violations,
            "church_name",
            payload.church_name.as_deref(),
            CHURCH_NAME_MAX_LEN,
        );
        let location = optional_text(
            &mut violations,
            "location",
            payload.location.as_deref(),
            LOCATION_MAX_LEN,
        );
        let section_id = require_id(&mut violations, "section", payload.section);
        if let Some(section_id) = section_id {
            match self.sections.get(section_id).await {
                Ok(Some(_)) => {}
                Ok(None) => violations.push(Violation::new(
                    "section",
                    format!("Invalid pk \"{section_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "section",
                    "Could not verify the referenced section.",
                )),
            }
        }
        match (church_name, section_id) {
            (Some(church_name), Some(section_id)) if violations.is_empty() => Ok(NewChurch {
                section_id,
                church_name,
                location,
            }),
            _ => Err(violations),
        }
    }

    async fn validate_patch(
        &self,
        payload: &ChurchPayload,
    ) -> Result<ChurchPatch, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut patch = ChurchPatch::default();
        if payload.church_name.is_some() {
            patch.church_name = require_text(
                &mut violations,
                "church_name",
                payload.church_name.as_deref(),
                CHURCH_NAME_MAX_LEN,
            );
        }
        if payload.location.is_some() {
            patch.location = optional_text(
                &mut violations,
                "location",
                payload.location.as_deref(),
                LOCATION_MAX_LEN,
            );
        }
        if let Some(section_id) = payload.section {
            match self.sections.get(section_id).await {
                Ok(Some(_)) => patch.section_id = Some(section_id),
                Ok(None) => violations.push(Violation::new(
                    "section",
                    format!("Invalid pk \"{section_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "section",
                    "Could not verify the referenced section.",
                )),
            }
        }
        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(violations)
        }
    }

    pub async fn list(&self, params: ChurchListParams) -> Result<Vec<Church>, DomainError> {
        self.churches.list(&Self::build_query(params)?).await
    }

    pub async fn get(&self, id: i32) -> Result<Church, DomainError> {
        self.churches
            .get(id)
            .await?
            .ok_or(DomainError::NotFound("church"))
    }

    pub async fn create(&self, payload: ChurchPayload) -> Result<Church, DomainError> {
        let new = self
            .validate(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.churches.create(new).await
    }

    pub async fn update(&self, id: i32, payload: ChurchPayload) -> Result<Church, DomainError> {
        let data = self
            .validate(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.churches
            .update(id, data)
            .await?
            .ok_or(DomainError::NotFound("church"))
    }

    pub async fn patch(&self, id: i32, payload: ChurchPayload) -> Result<Church, DomainError> {
        let patch = self
            .validate_patch(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.churches
            .patch(id, patch)
            .await?
            .ok_or(DomainError::NotFound("church"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.churches.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("church"))
        }
    }

    pub async fn statistics(&self) -> Result<ChurchStatistics, DomainError> {
        let snapshot = self.churches.list(&ChurchQuery::default()).await?;
        let (oldest_church, newest_church) =
            oldest_and_newest(&snapshot, |c| c.created_at, |c| c.church_name.clone());
        Ok(ChurchStatistics {
            total_churches: snapshot.len() as u64,
            recent_churches: count_recent(&snapshot, |c| c.created_at),
            oldest_church,
            newest_church,
        })
    }

    pub async fn summary(&self, id: i32) -> Result<ChurchSummary, DomainError> {
        let church = self.get(id).await?;
        let assignments = self.assignments.list_by_church(id).await?;
        Ok(ChurchSummary {
            church,
            assignments,
        })
    }

    pub async fn bulk_create(
        &self,
        items: Vec<ChurchPayload>,
    ) -> Result<Vec<Church>, DomainError> {
        check_bulk_shape("churches", items.len(), MAX_BULK_CREATE)?;
        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.validate(item).await {
                Ok(new) => validated.push(new),
                Err(item_violations) => {
                    violations.extend(prefix_violations("churches", index, item_violations));
                }
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.churches.create_many(validated).await
    }
}
