//! Record types for the seven collections and the [`Dataset`] that bundles them.
//!
//! Records are immutable values. Relationships are plain id references and
//! may dangle, so every lookup returns an `Option`.

pub mod application;
pub mod invoice;
pub mod owner;
pub mod property;
pub mod schedule_item;
pub mod tenant;
pub mod work_order;

use serde::{Deserialize, Serialize};

use crate::status::Labeled;
use crate::types::EntityKind;

pub use application::Application;
pub use invoice::Invoice;
pub use owner::Owner;
pub use property::Property;
pub use schedule_item::ScheduleItem;
pub use tenant::Tenant;
pub use work_order::WorkOrder;

/// A record addressable by string id.
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// A record whose lifecycle status can be changed after seeding.
pub trait StatusRecord: Record {
    type Status: Labeled;

    fn status(&self) -> Self::Status;

    /// Copy of the record with only the status replaced.
    fn with_status(&self, status: Self::Status) -> Self;
}

/// Find a record by id in an insertion-ordered collection.
pub fn find_by_id<'a, T: Record>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id() == id)
}

/// The seven collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
}

impl Dataset {
    pub fn property(&self, id: &str) -> Option<&Property> {
        find_by_id(&self.properties, id)
    }

    pub fn tenant(&self, id: &str) -> Option<&Tenant> {
        find_by_id(&self.tenants, id)
    }

    pub fn owner(&self, id: &str) -> Option<&Owner> {
        find_by_id(&self.owners, id)
    }

    pub fn tenants_of<'a>(&'a self, property_id: &'a str) -> impl Iterator<Item = &'a Tenant> {
        self.tenants
            .iter()
            .filter(move |t| t.property_id == property_id)
    }

    pub fn work_orders_of<'a>(
        &'a self,
        property_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkOrder> {
        self.work_orders
            .iter()
            .filter(move |wo| wo.property_id == property_id)
    }

    /// Work orders against the property that are not yet complete.
    pub fn open_work_orders_of<'a>(
        &'a self,
        property_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkOrder> {
        self.work_orders_of(property_id).filter(|wo| wo.is_open())
    }

    pub fn invoices_of<'a>(&'a self, property_id: &'a str) -> impl Iterator<Item = &'a Invoice> {
        self.invoices
            .iter()
            .filter(move |inv| inv.property_id == property_id)
    }

    /// Properties owned by `owner`, in the dataset's property order.
    /// Dangling ids in the owner's list are skipped.
    pub fn properties_of<'a>(&'a self, owner: &'a Owner) -> impl Iterator<Item = &'a Property> {
        self.properties
            .iter()
            .filter(move |p| owner.properties.iter().any(|id| *id == p.id))
    }

    /// Number of records per collection, keyed by kind.
    pub fn counts(&self) -> Vec<(EntityKind, usize)> {
        vec![
            (EntityKind::Property, self.properties.len()),
            (EntityKind::Tenant, self.tenants.len()),
            (EntityKind::Owner, self.owners.len()),
            (EntityKind::WorkOrder, self.work_orders.len()),
            (EntityKind::Invoice, self.invoices.len()),
            (EntityKind::Application, self.applications.len()),
            (EntityKind::ScheduleItem, self.schedule_items.len()),
        ]
    }
}
