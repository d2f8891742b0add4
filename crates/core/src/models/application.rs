use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Record, StatusRecord};
use crate::status::ApplicationStatus;
use crate::types::{EntityId, EntityKind, Money};

/// A rental application for a vacant unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: EntityId,
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub property_id: EntityId,
    pub unit: String,
    pub status: ApplicationStatus,
    pub credit_score: u16,
    /// Annual income.
    pub income: Money,
    pub submitted_at: NaiveDate,
}

impl Application {
    /// Annual income spread over twelve months, rounded to the nearest dollar.
    pub fn monthly_income(&self) -> Money {
        (self.income as f64 / 12.0).round() as Money
    }
}

impl Record for Application {
    const KIND: EntityKind = EntityKind::Application;

    fn id(&self) -> &str {
        &self.id
    }
}

impl StatusRecord for Application {
    type Status = ApplicationStatus;

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn with_status(&self, status: ApplicationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
