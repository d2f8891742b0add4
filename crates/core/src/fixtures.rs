//! Built-in seed data for the demo dashboard.
//!
//! The seed is embedded as JSON in the same camelCase shape the presentation
//! layer uses, so a replacement payload can be supplied at startup without
//! recompiling.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::models::{Dataset, Record};

const SEED_JSON: &str = include_str!("../fixtures/seed.json");

/// Lowest valid credit score.
pub const MIN_CREDIT_SCORE: u16 = 300;

/// Highest valid credit score.
pub const MAX_CREDIT_SCORE: u16 = 850;

/// The fixed "today" the seed data was written against.
pub fn demo_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 19).unwrap_or_default()
}

/// Decode and validate the built-in seed.
pub fn seed() -> Result<Dataset, CoreError> {
    from_json(SEED_JSON)
}

/// Decode and validate a caller-supplied fixture payload.
pub fn from_json(json: &str) -> Result<Dataset, CoreError> {
    let dataset: Dataset =
        serde_json::from_str(json).map_err(|e| CoreError::Fixture(e.to_string()))?;
    validate(&dataset)?;
    Ok(dataset)
}

/// Check the invariants the rest of the crate relies on.
///
/// - Ids are unique within each collection.
/// - Credit scores fall in `300..=850`.
/// - A property never has more vacant units than units.
///
/// Foreign keys are deliberately not checked; they are allowed to dangle.
pub fn validate(dataset: &Dataset) -> Result<(), CoreError> {
    ensure_unique_ids(&dataset.properties)?;
    ensure_unique_ids(&dataset.tenants)?;
    ensure_unique_ids(&dataset.owners)?;
    ensure_unique_ids(&dataset.work_orders)?;
    ensure_unique_ids(&dataset.invoices)?;
    ensure_unique_ids(&dataset.applications)?;
    ensure_unique_ids(&dataset.schedule_items)?;

    for tenant in &dataset.tenants {
        validate_credit_score(&tenant.id, tenant.credit_score)?;
    }
    for app in &dataset.applications {
        validate_credit_score(&app.id, app.credit_score)?;
    }
    for property in &dataset.properties {
        if property.vacant_units > property.units {
            return Err(CoreError::Validation(format!(
                "Property {} has {} vacant units but only {} units",
                property.id, property.vacant_units, property.units
            )));
        }
    }
    Ok(())
}

fn ensure_unique_ids<T: Record>(records: &[T]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(CoreError::Validation(format!(
                "Duplicate {} id '{}'",
                T::KIND,
                record.id()
            )));
        }
    }
    Ok(())
}

fn validate_credit_score(id: &str, score: u16) -> Result<(), CoreError> {
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "Credit score {score} for '{id}' must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::types::EntityKind;

    #[test]
    fn seed_has_expected_collection_sizes() {
        let data = seed().unwrap();
        assert_eq!(
            data.counts(),
            vec![
                (EntityKind::Property, 6),
                (EntityKind::Tenant, 8),
                (EntityKind::Owner, 4),
                (EntityKind::WorkOrder, 7),
                (EntityKind::Invoice, 8),
                (EntityKind::Application, 4),
                (EntityKind::ScheduleItem, 6),
            ]
        );
    }

    #[test]
    fn seed_preserves_insertion_order() {
        let data = seed().unwrap();
        let ids: Vec<&str> = data.invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["INV001", "INV002", "INV003", "INV004", "INV005", "INV006", "INV007", "INV008"]
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut data = seed().unwrap();
        let dup = data.tenants[0].clone();
        data.tenants.push(dup);
        assert_matches!(validate(&data), Err(CoreError::Validation(msg)) if msg.contains("T001"));
    }

    #[test]
    fn out_of_range_credit_score_is_rejected() {
        let mut data = seed().unwrap();
        data.applications[0].credit_score = 900;
        assert_matches!(validate(&data), Err(CoreError::Validation(_)));
    }

    #[test]
    fn malformed_json_is_a_fixture_error() {
        assert_matches!(from_json("{ not json"), Err(CoreError::Fixture(_)));
    }

    #[test]
    fn unknown_status_label_in_payload_is_a_fixture_error() {
        let json = r#"{ "invoices": [ {
            "id": "INV1", "invoiceNumber": "X", "tenantId": "T1", "propertyId": "P1",
            "amount": 1, "dueDate": "2025-01-01", "status": "Void", "type": "Rent",
            "createdAt": "2025-01-01"
        } ] }"#;
        assert_matches!(from_json(json), Err(CoreError::Fixture(_)));
    }

    #[test]
    fn partial_payload_defaults_missing_collections() {
        let data = from_json("{}").unwrap();
        assert_eq!(data, Dataset::default());
    }

    #[test]
    fn demo_today_is_fixed() {
        assert_eq!(demo_today().to_string(), "2025-01-19");
    }
}
