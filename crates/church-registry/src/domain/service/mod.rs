//! Use-case services, one per resource.
//!
//! Services validate raw payloads into typed inputs, orchestrate the
//! repositories and compute the derived read models (statistics, summaries).
//! Statistics are always computed from one fetched snapshot so that totals
//! and breakdowns agree with each other.

pub mod church_pastors;
pub mod church_roles;
pub mod churches;
pub mod districts;
pub mod pastors;
pub mod sections;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::domain::error::{DomainError, Violation};

/// Records created within this window count as "recent" in statistics.
pub(crate) const RECENT_WINDOW_DAYS: i64 = 30;

pub(crate) fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - TimeDelta::days(RECENT_WINDOW_DAYS)
}

pub(crate) fn count_recent<T>(items: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> u64 {
    let cutoff = recent_cutoff(Utc::now());
    items
        .iter()
        .filter(|item| created_at(item) >= cutoff)
        .count() as u64
}

/// Earliest- and latest-created labels; ties on identical timestamps keep
/// the first match in snapshot order.
pub(crate) fn oldest_and_newest<T>(
    items: &[T],
    created_at: impl Fn(&T) -> DateTime<Utc>,
    label: impl Fn(&T) -> String,
) -> (Option<String>, Option<String>) {
    let oldest = items.iter().min_by_key(|item| created_at(item)).map(&label);
    let newest = items.iter().max_by_key(|item| created_at(item)).map(&label);
    (oldest, newest)
}

/// Counts grouped by a categorical key, ordered by descending count
/// (key order breaks ties deterministically).
pub(crate) fn grouped_counts<T, K: Ord>(
    items: &[T],
    key: impl Fn(&T) -> K,
) -> Vec<(K, u64)> {
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_default() += 1;
    }
    let mut pairs: Vec<(K, u64)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

pub(crate) fn check_bulk_shape(
    key: &'static str,
    len: usize,
    limit: usize,
) -> Result<(), DomainError> {
    if len == 0 {
        return Err(DomainError::BadRequest(format!(
            "{key} field must be a non-empty list"
        )));
    }
    if len > limit {
        return Err(DomainError::BadRequest(format!(
            "Cannot create more than {limit} {key} at once. Provided: {len}"
        )));
    }
    Ok(())
}

pub(crate) fn prefix_violations(
    key: &'static str,
    index: usize,
    violations: Vec<Violation>,
) -> impl Iterator<Item = Violation> {
    violations
        .into_iter()
        .map(move |violation| {
            Violation::new(format!("{key}[{index}].{}", violation.field), violation.message)
        })
}

pub(crate) fn require_text(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Option<String> {
    match value {
        None => {
            violations.push(Violation::new(field, "This field is required."));
            None
        }
        Some(text) if text.is_empty() => {
            violations.push(Violation::new(field, "This field may not be blank."));
            None
        }
        Some(text) => bounded_text(violations, field, text, max_len),
    }
}

pub(crate) fn optional_text(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Option<String> {
    value.and_then(|text| bounded_text(violations, field, text, max_len))
}

fn bounded_text(
    violations: &mut Vec<Violation>,
    field: &'static str,
    text: &str,
    max_len: usize,
) -> Option<String> {
    if text.chars().count() > max_len {
        violations.push(Violation::new(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        ));
        None
    } else {
        Some(text.to_owned())
    }
}

pub(crate) fn parse_date(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: &str,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(Violation::new(
                field,
                "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
            ));
            None
        }
    }
}

pub(crate) fn require_choice<T>(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let Some(raw) = value else {
        violations.push(Violation::new(field, "This field is required."));
        return None;
    };
    match parse(raw) {
        Some(parsed) => Some(parsed),
        None => {
            violations.push(Violation::new(
                field,
                format!("\"{raw}\" is not a valid choice."),
            ));
            None
        }
    }
}

pub(crate) fn optional_choice<T>(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = value?;
    match parse(raw) {
        Some(parsed) => Some(parsed),
        None => {
            violations.push(Violation::new(
                field,
                format!("\"{raw}\" is not a valid choice."),
            ));
            None
        }
    }
}

pub(crate) fn require_id(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<i32>,
) -> Option<i32> {
    if value.is_none() {
        violations.push(Violation::new(field, "This field is required."));
    }
    value
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn oldest_and_newest_keep_first_match_on_ties() {
        let stamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let items = vec![("a", stamp), ("b", stamp), ("c", stamp)];
        let (oldest, newest) =
            oldest_and_newest(&items, |item| item.1, |item| item.0.to_owned());
        assert_eq!(oldest.as_deref(), Some("a"));
        assert_eq!(newest.as_deref(), Some("c"));
    }

    #[test]
    fn grouped_counts_order_by_descending_count() {
        let items = vec!["x", "y", "y", "z", "z"];
        let grouped = grouped_counts(&items, |item| (*item).to_owned());
        assert_eq!(grouped[0].1, 2);
        assert_eq!(grouped[2], ("x".to_owned(), 1));
    }

    #[test]
    fn check_bulk_shape_names_the_limit_and_count() {
        assert!(check_bulk_shape("pastors", 5, 100).is_ok());

        let err = check_bulk_shape("pastors", 0, 100).unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(_)));

        let DomainError::BadRequest(message) = check_bulk_shape("pastors", 101, 100).unwrap_err()
        else {
            panic!("expected bad request");
        };
        assert_eq!(
            message,
            "Cannot create more than 100 pastors at once. Provided: 101"
        );
    }

    #[test]
    fn prefix_violations_index_the_offending_item() {
        let violations = vec![Violation::new("name", "This field is required.")];
        let prefixed: Vec<Violation> = prefix_violations("districts", 2, violations).collect();
        assert_eq!(prefixed[0].field, "districts[2].name");
    }
}
