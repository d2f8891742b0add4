use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Record, StatusRecord};
use crate::status::{WorkOrderCategory, WorkOrderPriority, WorkOrderStatus};
use crate::types::{EntityId, EntityKind};

/// A maintenance request against a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: EntityId,
    pub property_id: EntityId,
    pub unit: String,
    pub title: String,
    pub description: String,
    pub priority: WorkOrderPriority,
    pub status: WorkOrderStatus,
    pub created_at: NaiveDate,
    pub assigned_to: String,
    pub category: WorkOrderCategory,
}

impl WorkOrder {
    pub fn is_open(&self) -> bool {
        self.status != WorkOrderStatus::Complete
    }
}

impl Record for WorkOrder {
    const KIND: EntityKind = EntityKind::WorkOrder;

    fn id(&self) -> &str {
        &self.id
    }
}

impl StatusRecord for WorkOrder {
    type Status = WorkOrderStatus;

    fn status(&self) -> WorkOrderStatus {
        self.status
    }

    fn with_status(&self, status: WorkOrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
