use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};
use crate::domain::model::{District, NewSection, Section, SectionPatch};
use crate::domain::query::{Ordering, SectionQuery};
use crate::domain::repos::{DistrictsRepository, SectionsRepository};
use crate::domain::service::{
    check_bulk_shape, count_recent, grouped_counts, oldest_and_newest, prefix_violations,
    require_id, require_text,
};

pub const ORDERING_FIELDS: &[&str] = &["name", "created_at"];
pub const MAX_BULK_CREATE: usize = 50;
const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SectionPayload {
    /// Parent district primary key.
    pub district: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SectionListParams {
    pub name: Option<String>,
    pub district: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistrictSectionCount {
    pub district: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionStatistics {
    pub total_sections: u64,
    pub recent_sections: u64,
    pub sections_by_district: Vec<DistrictSectionCount>,
    pub oldest_section: Option<String>,
    pub newest_section: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SectionSummary {
    pub section: Section,
    pub district: District,
}

pub struct SectionsService {
    sections: Arc<dyn SectionsRepository>,
    districts: Arc<dyn DistrictsRepository>,
}

impl SectionsService {
    pub fn new(
        sections: Arc<dyn SectionsRepository>,
        districts: Arc<dyn DistrictsRepository>,
    ) -> Self {
        Self {
            sections,
            districts,
        }
    }

    fn build_query(params: SectionListParams) -> Result<SectionQuery, DomainError> {
        let ordering = params
            .ordering
            .as_deref()
            .map(|raw| Ordering::parse(raw, ORDERING_FIELDS))
            .transpose()?;
        Ok(SectionQuery {
            name: params.name,
            district_id: params.district,
            search: params.search,
            ordering,
        })
    }

    /// Validates the payload shape and the parent district reference.
    async fn validate(&self, payload: &SectionPayload) -> Result<NewSection, Vec<Violation>> {
        let mut violations = Vec::new();
        let name = require_text(&mut violations, "name", payload.name.as_deref(), NAME_MAX_LEN);
        let district_id = require_id(&mut violations, "district", payload.district);
        if let Some(district_id) = district_id {
            match self.districts.get(district_id).await {
                Ok(Some(_)) => {}
                Ok(None) => violations.push(Violation::new(
                    "district",
                    format!("Invalid pk \"{district_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "district",
                    "Could not verify the referenced district.",
                )),
            }
        }
        match (name, district_id) {
            (Some(name), Some(district_id)) if violations.is_empty() => Ok(NewSection {
                district_id,
                name,
            }),
            _ => Err(violations),
        }
    }

    async fn validate_patch(
        &self,
        payload: &SectionPayload,
    ) -> Result<SectionPatch, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut patch = SectionPatch::default();
        if payload.name.is_some() {
            patch.name = require_text(&mut violations, "name", payload.name.as_deref(), NAME_MAX_LEN);
        }
        if let Some(district_id) = payload.district {
            match self.districts.get(district_id).await {
                Ok(Some(_)) => patch.district_id = Some(district_id),
                Ok(None) => violations.push(Violation::new(
                    "district",
                    format!("Invalid pk \"{district_id}\" - object does not exist."),
                )),
                Err(_) => violations.push(Violation::new(
                    "district",
                    "Could not verify the referenced district.",
                )),
            }
        }
        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(violations)
        }
    }

    pub async fn list(&self, params: SectionListParams) -> Result<Vec<Section>, DomainError> {
        self.sections.list(&Self::build_query(params)?).await
    }

    pub async fn by_district(&self, district_id: i32) -> Result<Vec<Section>, DomainError> {
        let query = SectionQuery {
            district_id: Some(district_id),
            ..Default::default()
        };
        self.sections.list(&query).await
    }

    pub async fn get(&self, id: i32) -> Result<Section, DomainError> {
        self.sections
            .get(id)
            .await?
            .ok_or(DomainError::NotFound("section"))
    }

    pub async fn create(&self, payload: SectionPayload) -> Result<Section, DomainError> {
        let new = self
            .validate(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.sections.create(new).await
    }

    pub async fn update(&self, id: i32, payload: SectionPayload) -> Result<Section, DomainError> {
        let data = self
            .validate(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.sections
            .update(id, data)
            .await?
            .ok_or(DomainError::NotFound("section"))
    }

    pub async fn patch(&self, id: i32, payload: SectionPayload) -> Result<Section, DomainError> {
        let patch = self
            .validate_patch(&payload)
            .await
            .map_err(DomainError::Validation)?;
        self.sections
            .patch(id, patch)
            .await?
            .ok_or(DomainError::NotFound("section"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.sections.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("section"))
        }
    }

    pub async fn statistics(&self) -> Result<SectionStatistics, DomainError> {
        let snapshot = self.sections.list(&SectionQuery::default()).await?;
        let (oldest_section, newest_section) =
            oldest_and_newest(&snapshot, |s| s.created_at, |s| s.name.clone());
        let sections_by_district = grouped_counts(&snapshot, |s| s.district_name.clone())
            .into_iter()
            .map(|(district, count)| DistrictSectionCount { district, count })
            .collect();
        Ok(SectionStatistics {
            total_sections: snapshot.len() as u64,
            recent_sections: count_recent(&snapshot, |s| s.created_at),
            sections_by_district,
            oldest_section,
            newest_section,
        })
    }

    pub async fn summary(&self, id: i32) -> Result<SectionSummary, DomainError> {
        let section = self.get(id).await?;
        let district = self
            .districts
            .get(section.district_id)
            .await?
            .ok_or(DomainError::NotFound("district"))?;
        Ok(SectionSummary { section, district })
    }

    pub async fn bulk_create(
        &self,
        items: Vec<SectionPayload>,
    ) -> Result<Vec<Section>, DomainError> {
        check_bulk_shape("sections", items.len(), MAX_BULK_CREATE)?;
        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.validate(item).await {
                Ok(new) => validated.push(new),
                Err(item_violations) => {
                    violations.extend(prefix_violations("sections", index, item_violations));
                }
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.sections.create_many(validated).await
    }
}
