use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};
use crate::domain::fields::{Gender, PastorRank, PastorStatus};
use crate::domain::model::{NewPastor, Pastor, PastorPatch};
use crate::domain::query::{Ordering, PastorQuery};
use crate::domain::repos::PastorsRepository;
use crate::domain::service::{
    check_bulk_shape, count_recent, grouped_counts, optional_choice, optional_text, parse_date,
    prefix_violations, require_choice, require_text,
};

pub const ORDERING_FIELDS: &[&str] = &[
    "full_name",
    "pastor_rank",
    "date_of_birth",
    "start_of_service",
    "created_at",
    "status",
];
pub const MAX_BULK_CREATE: usize = 100;
const FULL_NAME_MAX_LEN: usize = 150;
const NATIONAL_ID_MAX_LEN: usize = 30;

#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+2547[0-9]{8}$").expect("phone pattern is valid"));

const PHONE_FORMAT_MESSAGE: &str = "Phone number must be in format: '+254712345678'";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PastorPayload {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub pastor_rank: Option<String>,
    pub national_id: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub start_of_service: Option<String>,
    /// Defaults to `active` when omitted on create.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PastorListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub gender: Option<String>,
    pub pastor_rank: Option<String>,
    /// Short alias for `pastor_rank` kept for API compatibility.
    pub rank: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankCount {
    pub pastor_rank: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenderCount {
    pub gender: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorStatistics {
    pub total_pastors: u64,
    pub recent_pastors: u64,
    pub active_pastors: u64,
    pub retired_pastors: u64,
    pub pastors_by_rank: Vec<RankCount>,
    pub pastors_by_status: Vec<StatusCount>,
    pub pastors_by_gender: Vec<GenderCount>,
}

#[derive(Debug, Clone)]
pub struct PastorSummary {
    pub pastor: Pastor,
    pub age: i32,
    pub years_of_service: Option<i32>,
}

pub struct PastorsService {
    pastors: Arc<dyn PastorsRepository>,
}

impl PastorsService {
    pub fn new(pastors: Arc<dyn PastorsRepository>) -> Self {
        Self { pastors }
    }

    fn build_query(params: PastorListParams) -> Result<PastorQuery, DomainError> {
        let ordering = params
            .ordering
            .as_deref()
            .map(|raw| Ordering::parse(raw, ORDERING_FIELDS))
            .transpose()?;
        let mut violations = Vec::new();
        let gender = optional_choice(
            &mut violations,
            "gender",
            params.gender.as_deref(),
            Gender::parse,
        );
        let rank_param = params.pastor_rank.or(params.rank);
        let pastor_rank = optional_choice(
            &mut violations,
            "pastor_rank",
            rank_param.as_deref(),
            PastorRank::parse,
        );
        let status = optional_choice(
            &mut violations,
            "status",
            params.status.as_deref(),
            PastorStatus::parse,
        );
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        Ok(PastorQuery {
            gender,
            pastor_rank,
            status,
            search: params.search,
            ordering,
        })
    }

    fn validate(payload: &PastorPayload) -> Result<NewPastor, Vec<Violation>> {
        let mut violations = Vec::new();
        let full_name = require_text(
            &mut violations,
            "full_name",
            payload.full_name.as_deref(),
            FULL_NAME_MAX_LEN,
        );
        let gender = require_choice(
            &mut violations,
            "gender",
            payload.gender.as_deref(),
            Gender::parse,
        );
        let pastor_rank = require_choice(
            &mut violations,
            "pastor_rank",
            payload.pastor_rank.as_deref(),
            PastorRank::parse,
        );
        let national_id = optional_text(
            &mut violations,
            "national_id",
            payload.national_id.as_deref(),
            NATIONAL_ID_MAX_LEN,
        );
        let date_of_birth = match payload.date_of_birth.as_deref() {
            Some(raw) => parse_date(&mut violations, "date_of_birth", raw),
            None => {
                violations.push(Violation::new("date_of_birth", "This field is required."));
                None
            }
        };
        let phone_number = match payload.phone_number.as_deref() {
            Some(raw) if PHONE_RE.is_match(raw) => Some(raw.to_owned()),
            Some(_) => {
                violations.push(Violation::new("phone_number", PHONE_FORMAT_MESSAGE));
                None
            }
            None => {
                violations.push(Violation::new("phone_number", "This field is required."));
                None
            }
        };
        let start_of_service = payload
            .start_of_service
            .as_deref()
            .and_then(|raw| parse_date(&mut violations, "start_of_service", raw));
        let status = match payload.status.as_deref() {
            Some(raw) => optional_choice(&mut violations, "status", Some(raw), PastorStatus::parse),
            None => Some(PastorStatus::Active),
        };

        match (full_name, gender, pastor_rank, date_of_birth, phone_number, status) {
            (
                Some(full_name),
                Some(gender),
                Some(pastor_rank),
                Some(date_of_birth),
                Some(phone_number),
                Some(status),
            ) if violations.is_empty() => Ok(NewPastor {
                full_name,
                gender,
                pastor_rank,
                national_id,
                date_of_birth,
                phone_number,
                start_of_service,
                status,
            }),
            _ => Err(violations),
        }
    }

    fn validate_patch(payload: &PastorPayload) -> Result<PastorPatch, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut patch = PastorPatch::default();
        if payload.full_name.is_some() {
            patch.full_name = require_text(
                &mut violations,
                "full_name",
                payload.full_name.as_deref(),
                FULL_NAME_MAX_LEN,
            );
        }
        patch.gender = optional_choice(
            &mut violations,
            "gender",
            payload.gender.as_deref(),
            Gender::parse,
        );
        patch.pastor_rank = optional_choice(
            &mut violations,
            "pastor_rank",
            payload.pastor_rank.as_deref(),
            PastorRank::parse,
        );
        patch.national_id = optional_text(
            &mut violations,
            "national_id",
            payload.national_id.as_deref(),
            NATIONAL_ID_MAX_LEN,
        );
        if let Some(raw) = payload.date_of_birth.as_deref() {
            patch.date_of_birth = parse_date(&mut violations, "date_of_birth", raw);
        }
        if let Some(raw) = payload.phone_number.as_deref() {
            if PHONE_RE.is_match(raw) {
                patch.phone_number = Some(raw.to_owned());
            } else {
                violations.push(Violation::new("phone_number", PHONE_FORMAT_MESSAGE));
            }
        }
        if let Some(raw) = payload.start_of_service.as_deref() {
            patch.start_of_service = parse_date(&mut violations, "start_of_service", raw);
        }
        patch.status = optional_choice(
            &mut violations,
            "status",
            payload.status.as_deref(),
            PastorStatus::parse,
        );
        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(violations)
        }
    }

    pub async fn list(&self, params: PastorListParams) -> Result<Vec<Pastor>, DomainError> {
        self.pastors.list(&Self::build_query(params)?).await
    }

    pub async fn get(&self, id: i32) -> Result<Pastor, DomainError> {
        self.pastors
            .get(id)
            .await?
            .ok_or(DomainError::NotFound("pastor"))
    }

    pub async fn create(&self, payload: PastorPayload) -> Result<Pastor, DomainError> {
        let new = Self::validate(&payload).map_err(DomainError::Validation)?;
        self.pastors.create(new).await
    }

    pub async fn update(&self, id: i32, payload: PastorPayload) -> Result<Pastor, DomainError> {
        let data = Self::validate(&payload).map_err(DomainError::Validation)?;
        self.pastors
            .update(id, data)
            .await?
            .ok_or(DomainError::NotFound("pastor"))
    }

    pub async fn patch(&self, id: i32, payload: PastorPayload) -> Result<Pastor, DomainError> {
        let patch = Self::validate_patch(&payload).map_err(DomainError::Validation)?;
        self.pastors
            .patch(id, patch)
            .await?
            .ok_or(DomainError::NotFound("pastor"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.pastors.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound("pastor"))
        }
    }

    async fn list_by_status(&self, status: PastorStatus) -> Result<Vec<Pastor>, DomainError> {
        let query = PastorQuery {
            status: Some(status),
            ..Default::default()
        };
        self.pastors.list(&query).await
    }

    pub async fn by_rank(&self, rank: Option<&str>) -> Result<Vec<Pastor>, DomainError> {
        let raw = rank.ok_or_else(|| {
            DomainError::BadRequest("rank query parameter is required".to_owned())
        })?;
        let rank = PastorRank::parse(raw)
            .ok_or_else(|| DomainError::validation("rank", format!("\"{raw}\" is not a valid choice.")))?;
        let query = PastorQuery {
            pastor_rank: Some(rank),
            ..Default::default()
        };
        self.pastors.list(&query).await
    }

    pub async fn by_status(&self, status: Option<&str>) -> Result<Vec<Pastor>, DomainError> {
        let raw = status.ok_or_else(|| {
            DomainError::BadRequest("status query parameter is required".to_owned())
        })?;
        let status = PastorStatus::parse(raw)
            .ok_or_else(|| DomainError::validation("status", format!("\"{raw}\" is not a valid choice.")))?;
        self.list_by_status(status).await
    }

    pub async fn by_gender(&self, gender: Option<&str>) -> Result<Vec<Pastor>, DomainError> {
        let raw = gender.ok_or_else(|| {
            DomainError::BadRequest("gender query parameter is required".to_owned())
        })?;
        let gender = Gender::parse(raw)
            .ok_or_else(|| DomainError::validation("gender", format!("\"{raw}\" is not a valid choice.")))?;
        let query = PastorQuery {
            gender: Some(gender),
            ..Default::default()
        };
        self.pastors.list(&query).await
    }

    pub async fn active(&self) -> Result<Vec<Pastor>, DomainError> {
        self.list_by_status(PastorStatus::Active).await
    }

    pub async fn retired(&self) -> Result<Vec<Pastor>, DomainError> {
        self.list_by_status(PastorStatus::Retired).await
    }

    pub async fn statistics(&self) -> Result<PastorStatistics, DomainError> {
        let snapshot = self.pastors.list(&PastorQuery::default()).await?;
        let active_pastors = snapshot
            .iter()
            .filter(|p| p.status == PastorStatus::Active)
            .count() as u64;
        let retired_pastors = snapshot
            .iter()
            .filter(|p| p.status == PastorStatus::Retired)
            .count() as u64;
        let pastors_by_rank = grouped_counts(&snapshot, |p| p.pastor_rank.as_str())
            .into_iter()
            .map(|(rank, count)| RankCount {
                pastor_rank: rank.to_owned(),
                count,
            })
            .collect();
        let pastors_by_status = grouped_counts(&snapshot, |p| p.status.as_str())
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_owned(),
                count,
            })
            .collect();
        let pastors_by_gender = grouped_counts(&snapshot, |p| p.gender.as_str())
            .into_iter()
            .map(|(gender, count)| GenderCount {
                gender: gender.to_owned(),
                count,
            })
            .collect();
        Ok(PastorStatistics {
            total_pastors: snapshot.len() as u64,
            recent_pastors: count_recent(&snapshot, |p| p.created_at),
            active_pastors,
            retired_pastors,
            pastors_by_rank,
            pastors_by_status,
            pastors_by_gender,
        })
    }

    pub async fn summary(&self, id: i32) -> Result<PastorSummary, DomainError> {
        let pastor = self.get(id).await?;
        let today = Utc::now().date_naive();
        let age = pastor.age_on(today);
        let years_of_service = pastor.years_of_service_on(today);
        Ok(PastorSummary {
            pastor,
            age,
            years_of_service,
        })
    }

    pub async fn bulk_create(
        &self,
        items: Vec<PastorPayload>,
    ) -> Result<Vec<Pastor>, DomainError> {
        check_bulk_shape("pastors", items.len(), MAX_BULK_CREATE)?;
        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match Self::validate(item) {
                Ok(new) => validated.push(new),
                Err(item_violations) => {
                    violations.extend(prefix_violations("pastors", index, item_violations));
                }
            }
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.pastors.create_many(validated).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    #[derive(Default)]
    struct StubPastors {
        rows: Vec<Pastor>,
        created: Mutex<Vec<NewPastor>>,
    }

    #[async_trait]
    impl PastorsRepository for StubPastors {
        async fn list(&self, query: &PastorQuery) -> Result<Vec<Pastor>, DomainError> {
            Ok(self
                .rows
                .iter()
                .filter(|p| query.gender.is_none_or(|g| p.gender == g))
                .filter(|p| query.pastor_rank.is_none_or(|r| p.pastor_rank == r))
                .filter(|p| query.status.is_none_or(|s| p.status == s))
                .cloned()
                .collect())
        }

        async fn get(&self, id: i32) -> Result<Option<Pastor>, DomainError> {
            Ok(self.rows.iter().find(|p| p.id == id).cloned())
        }

        async fn create(&self, new: NewPastor) -> Result<Pastor, DomainError> {
            self.created.lock().unwrap().push(new.clone());
            Ok(pastor_from_new(1, new))
        }

        async fn create_many(&self, items: Vec<NewPastor>) -> Result<Vec<Pastor>, DomainError> {
            let mut created = self.created.lock().unwrap();
            let mut out = Vec::new();
            for (i, new) in items.into_iter().enumerate() {
                created.push(new.clone());
                out.push(pastor_from_new(i as i32 + 1, new));
            }
            Ok(out)
        }

        async fn update(&self, _id: i32, _data: NewPastor) -> Result<Option<Pastor>, DomainError> {
            Ok(None)
        }

        async fn patch(
            &self,
            _id: i32,
            _patch: PastorPatch,
        ) -> Result<Option<Pastor>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    fn pastor_from_new(id: i32, new: NewPastor) -> Pastor {
        let stamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        Pastor {
            id,
            full_name: new.full_name,
            gender: new.gender,
            pastor_rank: new.pastor_rank,
            national_id: new.national_id,
            date_of_birth: new.date_of_birth,
            phone_number: new.phone_number,
            start_of_service: new.start_of_service,
            status: new.status,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn sample_pastor(id: i32, name: &str, gender: Gender, status: PastorStatus) -> Pastor {
        let stamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        Pastor {
            id,
            full_name: name.to_owned(),
            gender,
            pastor_rank: PastorRank::Bishop,
            national_id: None,
            date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            phone_number: "+254712345678".to_owned(),
            start_of_service: Some(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
            status,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn valid_payload(name: &str) -> PastorPayload {
        PastorPayload {
            full_name: Some(name.to_owned()),
            gender: Some("Male".to_owned()),
            pastor_rank: Some("Bishop".to_owned()),
            national_id: Some("12345678".to_owned()),
            date_of_birth: Some("1970-01-01".to_owned()),
            phone_number: Some("+254712345678".to_owned()),
            start_of_service: Some("2000-01-01".to_owned()),
            status: Some("active".to_owned()),
        }
    }

    #[tokio::test]
    async fn create_collects_all_field_violations() {
        let repo = Arc::new(StubPastors::default());
        let svc = PastorsService::new(repo.clone());

        let err = svc.create(PastorPayload::default()).await.unwrap_err();
        let DomainError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"full_name"));
        assert!(fields.contains(&"gender"));
        assert!(fields.contains(&"pastor_rank"));
        assert!(fields.contains(&"date_of_birth"));
        assert!(fields.contains(&"phone_number"));
        assert!(repo.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_bad_phone_format() {
        let svc = PastorsService::new(Arc::new(StubPastors::default()));
        let mut payload = valid_payload("John Doe");
        payload.phone_number = Some("0712345678".to_owned());

        let err = svc.create(payload).await.unwrap_err();
        let DomainError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].field, "phone_number");
        assert_eq!(violations[0].message, PHONE_FORMAT_MESSAGE);
    }

    #[tokio::test]
    async fn status_defaults_to_active_on_create() {
        let repo = Arc::new(StubPastors::default());
        let svc = PastorsService::new(repo.clone());
        let mut payload = valid_payload("John Doe");
        payload.status = None;

        svc.create(payload).await.unwrap();
        assert_eq!(repo.created.lock().unwrap()[0].status, PastorStatus::Active);
    }

    #[tokio::test]
    async fn bulk_create_persists_nothing_when_one_item_is_invalid() {
        let repo = Arc::new(StubPastors::default());
        let svc = PastorsService::new(repo.clone());

        let mut malformed = valid_payload("Jane Smith");
        malformed.date_of_birth = None;
        let err = svc
            .bulk_create(vec![valid_payload("John Doe"), malformed])
            .await
            .unwrap_err();

        let DomainError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].field, "pastors[1].date_of_birth");
        assert!(repo.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn by_rank_requires_the_parameter() {
        let svc = PastorsService::new(Arc::new(StubPastors::default()));
        let err = svc.by_rank(None).await.unwrap_err();
        match err {
            DomainError::BadRequest(message) => {
                assert_eq!(message, "rank query parameter is required");
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn statistics_breaks_down_by_category() {
        let repo = Arc::new(StubPastors {
            rows: vec![
                sample_pastor(1, "John Doe", Gender::Male, PastorStatus::Active),
                sample_pastor(2, "Jane Smith", Gender::Female, PastorStatus::Retired),
                sample_pastor(3, "Bob Johnson", Gender::Male, PastorStatus::Active),
            ],
            created: Mutex::new(Vec::new()),
        });
        let svc = PastorsService::new(repo);

        let stats = svc.statistics().await.unwrap();
        assert_eq!(stats.total_pastors, 3);
        assert_eq!(stats.active_pastors, 2);
        assert_eq!(stats.retired_pastors, 1);
        assert_eq!(stats.pastors_by_gender[0].gender, "Male");
        assert_eq!(stats.pastors_by_gender[0].count, 2);
        let total_by_status: u64 = stats.pastors_by_status.iter().map(|s| s.count).sum();
        assert_eq!(total_by_status, stats.total_pastors);
    }

    #[tokio::test]
    async fn list_intersects_status_and_gender_filters() {
        let repo = Arc::new(StubPastors {
            rows: vec![
                sample_pastor(1, "John Doe", Gender::Male, PastorStatus::Active),
                sample_pastor(2, "Jane Smith", Gender::Female, PastorStatus::Active),
                sample_pastor(3, "Bob Johnson", Gender::Male, PastorStatus::Retired),
            ],
            created: Mutex::new(Vec::new()),
        });
        let svc = PastorsService::new(repo);

        let rows = svc
            .list(PastorListParams {
                status: Some("active".to_owned()),
                gender: Some("Male".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "John Doe");
    }
}
