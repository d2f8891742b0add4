use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::status::TenantStatus;
use crate::types::{EntityId, EntityKind, Money};

/// A leaseholder occupying a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub property_id: EntityId,
    pub unit: String,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
    pub rent_amount: Money,
    pub status: TenantStatus,
    pub credit_score: u16,
}

impl Tenant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Tenant {
    const KIND: EntityKind = EntityKind::Tenant;

    fn id(&self) -> &str {
        &self.id
    }
}
