use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All records are keyed by a short string id such as `"P001"` or `"INV004"`.
pub type EntityId = String;

/// Currency amounts are whole dollars. Owner balances may be negative.
pub type Money = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The seven record collections held by a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Property,
    Tenant,
    Owner,
    WorkOrder,
    Invoice,
    Application,
    ScheduleItem,
}

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Property,
        EntityKind::Tenant,
        EntityKind::Owner,
        EntityKind::WorkOrder,
        EntityKind::Invoice,
        EntityKind::Application,
        EntityKind::ScheduleItem,
    ];

    /// Stable snake_case name, used in logs, notifications and CLI arguments.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Property => "property",
            EntityKind::Tenant => "tenant",
            EntityKind::Owner => "owner",
            EntityKind::WorkOrder => "work_order",
            EntityKind::Invoice => "invoice",
            EntityKind::Application => "application",
            EntityKind::ScheduleItem => "schedule_item",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Property => "Property",
            EntityKind::Tenant => "Tenant",
            EntityKind::Owner => "Owner",
            EntityKind::WorkOrder => "Work order",
            EntityKind::Invoice => "Invoice",
            EntityKind::Application => "Application",
            EntityKind::ScheduleItem => "Schedule item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown entity kind '{s}'. Must be one of: {}",
                    EntityKind::ALL
                        .iter()
                        .map(|k| k.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
