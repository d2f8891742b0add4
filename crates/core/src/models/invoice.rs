use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Record, StatusRecord};
use crate::status::{InvoiceStatus, InvoiceType};
use crate::types::{EntityId, EntityKind, Money};

/// A bill issued to a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: EntityId,
    pub invoice_number: String,
    pub tenant_id: EntityId,
    pub property_id: EntityId,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    pub created_at: NaiveDate,
}

impl Record for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;

    fn id(&self) -> &str {
        &self.id
    }
}

impl StatusRecord for Invoice {
    type Status = InvoiceStatus;

    fn status(&self) -> InvoiceStatus {
        self.status
    }

    fn with_status(&self, status: InvoiceStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
