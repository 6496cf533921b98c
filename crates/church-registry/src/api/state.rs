use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::api::problem::Problem;
use crate::api::rest::error::domain_error_to_problem;
use crate::domain::error::DomainError;
use crate::domain::service::church_pastors::ChurchPastorsService;
use crate::domain::service::church_roles::ChurchRolesService;
use crate::domain::service::churches::ChurchesService;
use crate::domain::service::districts::DistrictsService;
use crate::domain::service::pastors::PastorsService;
use crate::domain::service::sections::SectionsService;
use crate::infra::storage::repos::{
    SeaOrmChurchPastorsRepository, SeaOrmChurchRolesRepository, SeaOrmChurchesRepository,
    SeaOrmDistrictsRepository, SeaOrmPastorsRepository, SeaOrmSectionsRepository,
};

/// Shared handler state: one service per resource plus error-reporting
/// configuration.
#[derive(Clone)]
pub struct AppState {
    pub districts: Arc<DistrictsService>,
    pub sections: Arc<SectionsService>,
    pub churches: Arc<ChurchesService>,
    pub church_roles: Arc<ChurchRolesService>,
    pub pastors: Arc<PastorsService>,
    pub church_pastors: Arc<ChurchPastorsService>,
    expose_internal_errors: bool,
}

impl AppState {
    /// Wires the SeaORM repositories and services onto one connection.
    #[must_use]
    pub fn from_db(db: DatabaseConnection, expose_internal_errors: bool) -> Self {
        let districts_repo = Arc::new(SeaOrmDistrictsRepository::new(db.clone()));
        let sections_repo = Arc::new(SeaOrmSectionsRepository::new(db.clone()));
        let churches_repo = Arc::new(SeaOrmChurchesRepository::new(db.clone()));
        let roles_repo = Arc::new(SeaOrmChurchRolesRepository::new(db.clone()));
        let pastors_repo = Arc::new(SeaOrmPastorsRepository::new(db.clone()));
        let assignments_repo = Arc::new(SeaOrmChurchPastorsRepository::new(db));

        Self {
            districts: Arc::new(DistrictsService::new(
                districts_repo.clone(),
                sections_repo.clone(),
                churches_repo.clone(),
            )),
            sections: Arc::new(SectionsService::new(
                sections_repo.clone(),
                districts_repo.clone(),
            )),
            churches: Arc::new(ChurchesService::new(
                churches_repo.clone(),
                sections_repo,
                assignments_repo.clone(),
            )),
            church_roles: Arc::new(ChurchRolesService::new(
                roles_repo.clone(),
                assignments_repo.clone(),
            )),
            pastors: Arc::new(PastorsService::new(pastors_repo.clone())),
            church_pastors: Arc::new(ChurchPastorsService::new(
                assignments_repo,
                churches_repo,
                pastors_repo,
                roles_repo,
            )),
            expose_internal_errors,
        }
    }

    pub(crate) fn problem(&self, error: &DomainError, instance: &str) -> Problem {
        domain_error_to_problem(error, instance, self.expose_internal_errors)
    }
}
