use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};
use crate::domain::model::{District, DistrictPatch, NewDistrict};
use crate::domain::query::{DistrictQuery, Ordering};
use crate::domain::repos::{ChurchesRepository, DistrictsRepository, SectionsRepository};
use crate::domain::service::{
    check_bulk_shape, count_recent, oldest_and_newest, prefix_violations, require_text,
};

pub const ORDERING_FIELDS: &[&str] = &["name", "created_at", "updated_at"];
pub const MAX_BULK_CREATE: usize = 10;
const NAME_MAX_LEN: usize = 100;

/// Raw create/update payload; every field optional so that validation can
/// report all missing fields at once.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DistrictPayload {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DistrictListParams {
    pub name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistrictStatistics {
    pub total_districts: u64,
    pub recent_districts: u64,
    pub oldest_district: Option<String>,
    pub newest_district: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DistrictSummary {
    pub district: District,
    pub sections_count: u64,
    pub churches_count: u64,
}

pub struct DistrictsService {
    districts: Arc<dyn DistrictsRepository>,
    sections: Arc<dyn SectionsRepository>,
    churches: Arc<dyn ChurchesRepository>,
}

impl DistrictsService {
    pub fn new(
        districts: Arc<dyn DistrictsRepository>,
        sections: Arc<dyn SectionsRepository>,
        churches: Arc<dyn ChurchesRepository>,
    ) -> Self {
        Self {
            districts,
            sections,
            churches,
        }
    }

    fn build_query(params: DistrictListParams) -> Result<DistrictQuery, DomainError> {
        let ordering = params
            .ordering
            .as_deref()
            .map(|raw| Ordering::parse(raw, ORDERING_FIELDS))
            .transpose()?;
        Ok(DistrictQuery {
            name: params.name,
            search: params.search,
            ordering,
        })
    }

    fn validate(payload: &DistrictPayload) -> Result<NewDistrict, Vec<Violation>> {
        let mut violations = Vec::new();
        let name = require_text(&mut violations, "name", payload.name.as_deref(), NAME_MAX_LEN);
        match name {
            Some(name) if violations.is_empty() => Ok(NewDistrict { name }),
            _ => Err(violations),
        }
    }

    fn validate_patch(payload: &DistrictPayload) -> Result<DistrictPatch, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut patch = DistrictPatch::default();
        if payload.name.is_some() {
            patch.name = require_text(&mut violations, "name", payload.name.as_deref(), NAME_MAX_LEN);
        }
        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(violations)
        }
    }

    pub async fn list(&self, params: DistrictListParams) -> Result<Vec<District>, DomainError> {
        self.districts.list(&Self::build_query(params)?).await
    }

    pub async fn get(&self, id: i32) -> Result<District, DomainError> {
        self.districts
            .get(id)
            .await?
            .ok_or(DomainError::NotFound("district"))
    }

    pub async fn create(&self, payload: DistrictPayload) -> Result<District, DomainError> {
        let new = Self::validate(&payload).map_err(DomainError::Validation)?;
        self.districts.create(new).await
    }

    pub async fn update(&self, id: i32, payload: DistrictPayload) -> Result<District, DomainError> {
        let data = Self::validate(&payload).map_err(DomainError::Validation)?;
        self.districts
            .update(id, data)
            .await?
            .ok_or(DomainError::NotFound("district"))
    }

    pub async fn patch(&self, id: i32, payload: DistrictPayload) -> Result<District, DomainError> {
        let patch = Self::validate_patch(&payload).map_err(DomainError::Validation)?;
        self.districts
            .patch(id, patch)
            .await?
            .ok_or(DomainError::NotFound("district"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.districts.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("district"))
        }
    }

    pub async fn statistics(&self) -> Result<DistrictStatistics, DomainError> {
        let snapshot = self.districts.list(&DistrictQuery::default()).await?;
        let (oldest_district, newest_district) =
            oldest_and_newest(&snapshot, |d| d.created_at, |d| d.name.clone());
        Ok(DistrictStatistics {
            total_districts: snapshot.len() as u64,
            recent_districts: count_recent(&snapshot, |d| d.created_at),
            oldest_district,
            newest_district,
        })
    }

    pub async fn summary(&self, id: i32) -> Result<DistrictSummary, DomainError> {
        let district = self.get(id).await?;
        let sections_count = self.sections.count_by_district(id).await?;
        let churches_count = self.churches.count_by_district(id).await?;
        Ok(DistrictSummary {
            district,
            sections_count,
            churches_count,
        })
    }

    pub async fn bulk_create(
        &self,
        items: Vec<DistrictPayload>,
    ) -> Result<Vec<District>, DomainError> {
        check_bulk_shape("districts", items.len(), MAX_BULK_CREATE)?;
        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match Self::validate(item) {
                Ok(new) => validated.push(new),
                Err(item_violations) => {
                    violations.extend(prefix_violations("districts", index, item_violations));
                }
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.districts.create_many(validated).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::model::{NewSection, Section, SectionPatch};
    use crate::domain::query::SectionQuery;
    use crate::domain::repos::SectionsRepository;

    struct StubDistricts {
        rows: Vec<District>,
    }

    #[async_trait]
    impl DistrictsRepository for StubDistricts {
        async fn list(&self, _query: &DistrictQuery) -> Result<Vec<District>, DomainError> {
            Ok(self.rows.clone())
        }

        async fn get(&self, id: i32) -> Result<Option<District>, DomainError> {
            Ok(self.rows.iter().find(|d| d.id == id).cloned())
        }

        async fn create(&self, new: NewDistrict) -> Result<District, DomainError> {
            Ok(district(99, &new.name, 0))
        }

        async fn create_many(
            &self,
            items: Vec<NewDistrict>,
        ) -> Result<Vec<District>, DomainError> {
            Ok(items
                .into_iter()
                .enumerate()
                .map(|(i, new)| district(i as i32 + 1, &new.name, 0))
                .collect())
        }

        async fn update(
            &self,
            _id: i32,
            _data: NewDistrict,
        ) -> Result<Option<District>, DomainError> {
            Ok(None)
        }

        async fn patch(
            &self,
            _id: i32,
            _patch: DistrictPatch,
        ) -> Result<Option<District>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    struct StubSections;

    #[async_trait]
    impl SectionsRepository for StubSections {
        async fn list(&self, _query: &SectionQuery) -> Result<Vec<Section>, DomainError> {
            Ok(Vec::new())
        }

        async fn get(&self, _id: i32) -> Result<Option<Section>, DomainError> {
            Ok(None)
        }

        async fn create(&self, _new: NewSection) -> Result<Section, DomainError> {
            Err(DomainError::NotFound("section"))
        }

        async fn create_many(
            &self,
            _items: Vec<NewSection>,
        ) -> Result<Vec<Section>, DomainError> {
            Ok(Vec::new())
        }

        async fn update(
            &self,
            _id: i32,
            _data: NewSection,
        ) -> Result<Option<Section>, DomainError> {
            Ok(None)
        }

        async fn patch(
            &self,
            _id: i32,
            _patch: SectionPatch,
        ) -> Result<Option<Section>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn count_by_district(&self, _district_id: i32) -> Result<u64, DomainError> {
            Ok(3)
        }
    }

    struct StubChurches;

    #[async_trait]
    impl ChurchesRepository for StubChurches {
        async fn list(
            &self,
            _query: &crate::domain::query::ChurchQuery,
        ) -> Result<Vec<crate::domain::model::Church>, DomainError> {
            Ok(Vec::new())
        }

        async fn get(
            &self,
            _id: i32,
        ) -> Result<Option<crate::domain::model::Church>, DomainError> {
            Ok(None)
        }

        async fn create(
            &self,
            _new: crate::domain::model::NewChurch,
        ) -> Result<crate::domain::model::Church, DomainError> {
            Err(DomainError::NotFound("church"))
        }

        async fn create_many(
            &self,
            _items: Vec<crate::domain::model::NewChurch>,
        ) -> Result<Vec<crate::domain::model::Church>, DomainError> {
            Ok(Vec::new())
        }

        async fn update(
            &self,
            _id: i32,
            _data: crate::domain::model::NewChurch,
        ) -> Result<Option<crate::domain::model::Church>, DomainError> {
            Ok(None)
        }

        async fn patch(
            &self,
            _id: i32,
            _patch: crate::domain::model::ChurchPatch,
        ) -> Result<Option<crate::domain::model::Church>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn count_by_district(&self, _district_id: i32) -> Result<u64, DomainError> {
            Ok(5)
        }
    }

    fn district(id: i32, name: &str, day: u32) -> District {
        let stamp = Utc.with_ymd_and_hms(2020, 1, 1 + day, 0, 0, 0).unwrap();
        District {
            id,
            name: name.to_owned(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn service(rows: Vec<District>) -> DistrictsService {
        DistrictsService::new(
            Arc::new(StubDistricts { rows }),
            Arc::new(StubSections),
            Arc::new(StubChurches),
        )
    }

    #[tokio::test]
    async fn statistics_reports_totals_and_extremes() {
        let svc = service(vec![
            district(1, "Central", 2),
            district(2, "Coast", 0),
            district(3, "Highlands", 5),
        ]);

        let stats = svc.statistics().await.unwrap();
        assert_eq!(stats.total_districts, 3);
        assert_eq!(stats.oldest_district.as_deref(), Some("Coast"));
        assert_eq!(stats.newest_district.as_deref(), Some("Highlands"));
    }

    #[tokio::test]
    async fn statistics_on_empty_collection_has_no_extremes() {
        let svc = service(Vec::new());
        let stats = svc.statistics().await.unwrap();
        assert_eq!(stats.total_districts, 0);
        assert_eq!(stats.recent_districts, 0);
        assert!(stats.oldest_district.is_none());
        assert!(stats.newest_district.is_none());
    }

    #[tokio::test]
    async fn create_rejects_missing_name() {
        let svc = service(Vec::new());
        let err = svc.create(DistrictPayload::default()).await.unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "name");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bulk_create_rejects_empty_and_oversized_batches() {
        let svc = service(Vec::new());

        let err = svc.bulk_create(Vec::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(_)));

        let oversized = (0..=MAX_BULK_CREATE)
            .map(|i| DistrictPayload {
                name: Some(format!("District {i}")),
            })
            .collect();
        let err = svc.bulk_create(oversized).await.unwrap_err();
        match err {
            DomainError::BadRequest(message) => {
                assert!(message.contains("10"));
                assert!(message.contains("11"));
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bulk_create_reports_indexed_violations() {
        let svc = service(Vec::new());
        let err = svc
            .bulk_create(vec![
                DistrictPayload {
                    name: Some("Valid".to_owned()),
                },
                DistrictPayload { name: None },
            ])
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "districts[1].name");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn summary_includes_child_counts() {
        let svc = service(vec![district(7, "Central", 0)]);
        let summary = svc.summary(7).await.unwrap();
        assert_eq!(summary.district.display_id(), "DIS007");
        assert_eq!(summary.sections_count, 3);
        assert_eq!(summary.churches_count, 5);
    }

    #[tokio::test]
    async fn list_rejects_unknown_ordering_field() {
        let svc = service(Vec::new());
        let err = svc
            .list(DistrictListParams {
                ordering: Some("id".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
