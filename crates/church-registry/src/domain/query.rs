//! Allow-listed list-query model.
//!
//! Every list endpoint accepts exact-match filters, a substring `search`
//! term and an `ordering` field (descending with a `-` prefix). Ordering
//! fields are validated against the entity's allow-list; unknown fields are
//! rejected rather than silently ignored.

use crate::domain::error::DomainError;
use crate::domain::fields::{Gender, PastorRank, PastorStatus, RoleName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: &'static str,
    pub direction: Direction,
}

impl Ordering {
    /// Parses `field` or `-field` against an allow-list.
    pub fn parse(raw: &str, allowed: &'static [&'static str]) -> Result<Self, DomainError> {
        let (name, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, Direction::Desc),
            None => (raw, Direction::Asc),
        };
        allowed
            .iter()
            .copied()
            .find(|candidate| *candidate == name)
            .map(|field| Self { field, direction })
            .ok_or_else(|| {
                DomainError::validation(
                    "ordering",
                    format!(
                        "unknown ordering field '{name}', expected one of: {}",
                        allowed.join(", ")
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DistrictQuery {
    pub name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, Default)]
pub struct SectionQuery {
    pub name: Option<String>,
    pub district_id: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, Default)]
pub struct ChurchQuery {
    pub section_id: Option<i32>,
    pub church_name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, Default)]
pub struct ChurchRoleQuery {
    pub role_name: Option<RoleName>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, Default)]
pub struct PastorQuery {
    pub gender: Option<Gender>,
    pub pastor_rank: Option<PastorRank>,
    pub status: Option<PastorStatus>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, Default)]
pub struct ChurchPastorQuery {
    pub church_id: Option<i32>,
    pub pastor_id: Option<i32>,
    pub role_id: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["name", "created_at"];

    #[test]
    fn parse_ascending_by_default() {
        let ordering = Ordering::parse("name", ALLOWED).unwrap();
        assert_eq!(ordering.field, "name");
        assert_eq!(ordering.direction, Direction::Asc);
    }

    #[test]
    fn parse_descending_with_prefix() {
        let ordering = Ordering::parse("-created_at", ALLOWED).unwrap();
        assert_eq!(ordering.field, "created_at");
        assert_eq!(ordering.direction, Direction::Desc);
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let err = Ordering::parse("id", ALLOWED).unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations[0].field, "ordering");
                assert!(violations[0].message.contains("'id'"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
