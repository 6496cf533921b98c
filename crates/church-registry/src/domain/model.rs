//! Typed domain records and their validated input forms.
//!
//! Records mirror what the storage layer persists, plus the parent display
//! names resolved at query time. Display identifiers are never stored; they
//! are derived from the numeric primary key on read.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::fields::{Gender, PastorRank, PastorStatus, RoleName};

/// Formats a derived display identifier: fixed prefix plus the primary key
/// zero-padded to at least three digits (`DIS007`, `PAS012`).
#[must_use]
pub fn display_id(prefix: &str, id: i32) -> String {
    format!("{prefix}{id:03}")
}

/// Whole years completed between `from` and `to`; a year counts only once
/// the month/day has passed.
#[must_use]
pub fn completed_years(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl District {
    #[must_use]
    pub fn display_id(&self) -> String {
        display_id("DIS", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDistrict {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistrictPatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: i32,
    pub district_id: i32,
    /// Parent district name, resolved at query time.
    pub district_name: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Section {
    #[must_use]
    pub fn display_id(&self) -> String {
        display_id("SEC", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSection {
    pub district_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionPatch {
    pub district_id: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Church {
    pub id: i32,
    pub section_id: i32,
    /// Parent section name, resolved at query time.
    pub section_name: String,
    pub church_name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Church {
    #[must_use]
    pub fn display_id(&self) -> String {
        display_id("CHU", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChurch {
    pub section_id: i32,
    pub church_name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChurchPatch {
    pub section_id: Option<i32>,
    pub church_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchRole {
    pub id: i32,
    pub role_name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChurchRole {
    #[must_use]
    pub fn display_id(&self) -> String {
        display_id("ROL", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChurchRole {
    pub role_name: RoleName,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChurchRolePatch {
    pub role_name: Option<RoleName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pastor {
    pub id: i32,
    pub full_name: String,
    pub gender: Gender,
    pub pastor_rank: PastorRank,
    pub national_id: Option<String>,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub start_of_service: Option<NaiveDate>,
    pub status: PastorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pastor {
    #[must_use]
    pub fn display_id(&self) -> String {
        display_id("PAS", self.id)
    }

    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        completed_years(self.date_of_birth, today)
    }

    #[must_use]
    pub fn years_of_service_on(&self, today: NaiveDate) -> Option<i32> {
        self.start_of_service
            .map(|start| completed_years(start, today))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPastor {
    pub full_name: String,
    pub gender: Gender,
    pub pastor_rank: PastorRank,
    pub national_id: Option<String>,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub start_of_service: Option<NaiveDate>,
    pub status: PastorStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PastorPatch {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub pastor_rank: Option<PastorRank>,
    pub national_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub start_of_service: Option<NaiveDate>,
    pub status: Option<PastorStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchPastor {
    pub id: i32,
    pub church_id: i32,
    pub pastor_id: i32,
    pub role_id: i32,
    /// Joined display names, resolved at query time.
    pub church_name: String,
    pub pastor_name: String,
    pub role_name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChurchPastor {
    #[must_use]
    pub fn display_id(&self) -> String {
        display_id("ASG", self.id)
    }

    /// Human-readable assignment label, `"<pastor> - <role> at <church>"`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} - {} at {}",
            self.pastor_name,
            self.role_name.as_str(),
            self.church_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChurchPastor {
    pub church_id: i32,
    pub pastor_id: i32,
    pub role_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChurchPastorPatch {
    pub church_id: Option<i32>,
    pub pastor_id: Option<i32>,
    pub role_id: Option<i32>,
}
