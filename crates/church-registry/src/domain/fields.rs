//! Closed field vocabularies shared by the domain and storage layers.
//!
//! Each enum is stored as its wire string and validated on the way in, so
//! the database, the JSON API and the domain all agree on the same labels.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
}

impl Gender {
    pub const CHOICES: &'static [&'static str] = &["Male", "Female"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
pub enum PastorRank {
    #[sea_orm(string_value = "ArchBishop")]
    ArchBishop,
    #[sea_orm(string_value = "Bishop")]
    Bishop,
    #[sea_orm(string_value = "Presbyter")]
    Presbyter,
    #[sea_orm(string_value = "Reverend")]
    Reverend,
    #[sea_orm(string_value = "Pastor")]
    Pastor,
}

impl PastorRank {
    pub const CHOICES: &'static [&'static str] =
        &["ArchBishop", "Bishop", "Presbyter", "Reverend", "Pastor"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ArchBishop" => Some(Self::ArchBishop),
            "Bishop" => Some(Self::Bishop),
            "Presbyter" => Some(Self::Presbyter),
            "Reverend" => Some(Self::Reverend),
            "Pastor" => Some(Self::Pastor),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArchBishop => "ArchBishop",
            Self::Bishop => "Bishop",
            Self::Presbyter => "Presbyter",
            Self::Reverend => "Reverend",
            Self::Pastor => "Pastor",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PastorStatus {
    #[sea_orm(string_value = "active")]
    #[serde(rename = "active")]
    Active,
    #[sea_orm(string_value = "suspended")]
    #[serde(rename = "suspended")]
    Suspended,
    #[sea_orm(string_value = "retired")]
    #[serde(rename = "retired")]
    Retired,
    #[sea_orm(string_value = "deceased")]
    #[serde(rename = "deceased")]
    Deceased,
}

impl PastorStatus {
    pub const CHOICES: &'static [&'static str] = &["active", "suspended", "retired", "deceased"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "retired" => Some(Self::Retired),
            "deceased" => Some(Self::Deceased),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Retired => "retired",
            Self::Deceased => "deceased",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum RoleName {
    #[sea_orm(string_value = "Senior Pastor")]
    #[serde(rename = "Senior Pastor")]
    SeniorPastor,
    #[sea_orm(string_value = "Assistant Pastor")]
    #[serde(rename = "Assistant Pastor")]
    AssistantPastor,
    #[sea_orm(string_value = "Youth Pastor")]
    #[serde(rename = "Youth Pastor")]
    YouthPastor,
    #[sea_orm(string_value = "Missions Pastor")]
    #[serde(rename = "Missions Pastor")]
    MissionsPastor,
    #[sea_orm(string_value = "Associate Minister")]
    #[serde(rename = "Associate Minister")]
    AssociateMinister,
}

impl RoleName {
    pub const CHOICES: &'static [&'static str] = &[
        "Senior Pastor",
        "Assistant Pastor",
        "Youth Pastor",
        "Missions Pastor",
        "Associate Minister",
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Senior Pastor" => Some(Self::SeniorPastor),
            "Assistant Pastor" => Some(Self::AssistantPastor),
            "Youth Pastor" => Some(Self::YouthPastor),
            "Missions Pastor" => Some(Self::MissionsPastor),
            "Associate Minister" => Some(Self::AssociateMinister),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SeniorPastor => "Senior Pastor",
            Self::AssistantPastor => "Assistant Pastor",
            Self::YouthPastor => "Youth Pastor",
            Self::MissionsPastor => "Missions Pastor",
            Self::AssociateMinister => "Associate Minister",
        }
    }
}
