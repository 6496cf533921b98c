//! Repository traits: the persistence seam between services and storage.
//!
//! Implementations live in `infra::storage`; tests substitute mocks.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::model::{
    Church, ChurchPastor, ChurchPastorPatch, ChurchPatch, ChurchRole, ChurchRolePatch, District,
    DistrictPatch, NewChurch, NewChurchPastor, NewChurchRole, NewDistrict, NewPastor, NewSection,
    Pastor, PastorPatch, Section, SectionPatch,
};
use crate::domain::query::{
    ChurchPastorQuery, ChurchQuery, ChurchRoleQuery, DistrictQuery, PastorQuery, SectionQuery,
};

#[async_trait]
pub trait DistrictsRepository: Send + Sync {
    async fn list(&self, query: &DistrictQuery) -> Result<Vec<District>, DomainError>;
    async fn get(&self, id: i32) -> Result<Option<District>, DomainError>;
    async fn create(&self, new: NewDistrict) -> Result<District, DomainError>;
    /// Inserts all rows in one transaction; nothing is committed on failure.
    async fn create_many(&self, items: Vec<NewDistrict>) -> Result<Vec<District>, DomainError>;
    async fn update(&self, id: i32, data: NewDistrict) -> Result<Option<District>, DomainError>;
    async fn patch(&self, id: i32, patch: DistrictPatch) -> Result<Option<District>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait SectionsRepository: Send + Sync {
    async fn list(&self, query: &SectionQuery) -> Result<Vec<Section>, DomainError>;
    async fn get(&self, id: i32) -> Result<Option<Section>, DomainError>;
    async fn create(&self, new: NewSection) -> Result<Section, DomainError>;
    async fn create_many(&self, items: Vec<NewSection>) -> Result<Vec<Section>, DomainError>;
    async fn update(&self, id: i32, data: NewSection) -> Result<Option<Section>, DomainError>;
    async fn patch(&self, id: i32, patch: SectionPatch) -> Result<Option<Section>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    async fn count_by_district(&self, district_id: i32) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait ChurchesRepository: Send + Sync {
    async fn list(&self, query: &ChurchQuery) -> Result<Vec<Church>, DomainError>;
    async fn get(&self, id: i32) -> Result<Option<Church>, DomainError>;
    async fn create(&self, new: NewChurch) -> Result<Church, DomainError>;
    async fn create_many(&self, items: Vec<NewChurch>) -> Result<Vec<Church>, DomainError>;
    async fn update(&self, id: i32, data: NewChurch) -> Result<Option<Church>, DomainError>;
    async fn patch(&self, id: i32, patch: ChurchPatch) -> Result<Option<Church>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    /// Churches reached through the district's sections.
    async fn count_by_district(&self, district_id: i32) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait ChurchRolesRepository: Send + Sync {
    async fn list(&self, query: &ChurchRoleQuery) -> Result<Vec<ChurchRole>, DomainError>;
    async fn get(&self, id: i32) -> Result<Option<ChurchRole>, DomainError>;
    async fn create(&self, new: NewChurchRole) -> Result<ChurchRole, DomainError>;
    async fn create_many(&self, items: Vec<NewChurchRole>)
    -> Result<Vec<ChurchRole>, DomainError>;
    async fn update(&self, id: i32, data: NewChurchRole)
    -> Result<Option<ChurchRole>, DomainError>;
    async fn patch(
        &self,
        id: i32,
        patch: ChurchRolePatch,
    ) -> Result<Option<ChurchRole>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait PastorsRepository: Send + Sync {
    async fn list(&self, query: &PastorQuery) -> Result<Vec<Pastor>, DomainError>;
    async fn get(&self, id: i32) -> Result<Option<Pastor>, DomainError>;
    async fn create(&self, new: NewPastor) -> Result<Pastor, DomainError>;
    async fn create_many(&self, items: Vec<NewPastor>) -> Result<Vec<Pastor>, DomainError>;
    async fn update(&self, id: i32, data: NewPastor) -> Result<Option<Pastor>, DomainError>;
    async fn patch(&self, id: i32, patch: PastorPatch) -> Result<Option<Pastor>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait ChurchPastorsRepository: Send + Sync {
    async fn list(&self, query: &ChurchPastorQuery) -> Result<Vec<ChurchPastor>, DomainError>;
    async fn get(&self, id: i32) -> Result<Option<ChurchPastor>, DomainError>;
    async fn create(&self, new: NewChurchPastor) -> Result<ChurchPastor, DomainError>;
    async fn create_many(
        &self,
        items: Vec<NewChurchPastor>,
    ) -> Result<Vec<ChurchPastor>, DomainError>;
    async fn update(
        &self,
        id: i32,
        data: NewChurchPastor,
    ) -> Result<Option<ChurchPastor>, DomainError>;
    async fn patch(
        &self,
        id: i32,
        patch: ChurchPastorPatch,
    ) -> Result<Option<ChurchPastor>, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    async fn list_by_church(&self, church_id: i32) -> Result<Vec<ChurchPastor>, DomainError>;
    async fn count_by_role(&self, role_id: i32) -> Result<u64, DomainError>;
}
