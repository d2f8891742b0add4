use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::types::{EntityId, EntityKind, Money};

/// A property owner receiving distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Owned property ids. Entries may reference properties that no longer exist.
    pub properties: Vec<EntityId>,
    pub total_units: u32,
    /// Signed: a negative balance is owed by the owner.
    pub balance: Money,
}

impl Owner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Owner {
    const KIND: EntityKind = EntityKind::Owner;

    fn id(&self) -> &str {
        &self.id
    }
}
