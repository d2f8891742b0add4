//! Copy-on-write storage for the seven collections.
//!
//! Each collection lives behind its own `RwLock<Arc<Vec<T>>>`. Readers clone
//! the `Arc` and release the lock immediately; writers build a complete new
//! `Vec` and swap it in, so a reader never observes a half-applied change.

use std::sync::{Arc, PoisonError, RwLock};

use propdash_core::models::{
    Application, Dataset, Invoice, Owner, Property, Record, ScheduleItem, Tenant, WorkOrder,
};

/// One collection.
#[derive(Debug)]
pub struct Slot<T>(RwLock<Arc<Vec<T>>>);

impl<T: Clone> Slot<T> {
    fn new(records: Vec<T>) -> Self {
        Self(RwLock::new(Arc::new(records)))
    }

    /// Current contents. Cheap: clones the `Arc`, not the records.
    pub fn load(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.0.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the contents with the result of `f`, atomically.
    ///
    /// `f` sees the current contents and either returns the new collection or
    /// an error, in which case nothing changes.
    pub fn replace_with<R, E>(
        &self,
        f: impl FnOnce(&[T]) -> Result<(Vec<T>, R), E>,
    ) -> Result<R, E> {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let (next, out) = f(guard.as_slice())?;
        *guard = Arc::new(next);
        Ok(out)
    }
}

/// All seven collections.
#[derive(Debug)]
pub struct Tables {
    properties: Slot<Property>,
    tenants: Slot<Tenant>,
    owners: Slot<Owner>,
    work_orders: Slot<WorkOrder>,
    invoices: Slot<Invoice>,
    applications: Slot<Application>,
    schedule_items: Slot<ScheduleItem>,
}

impl Tables {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            properties: Slot::new(dataset.properties),
            tenants: Slot::new(dataset.tenants),
            owners: Slot::new(dataset.owners),
            work_orders: Slot::new(dataset.work_orders),
            invoices: Slot::new(dataset.invoices),
            applications: Slot::new(dataset.applications),
            schedule_items: Slot::new(dataset.schedule_items),
        }
    }

    /// Owned copy of every collection.
    pub fn dataset(&self) -> Dataset {
        Dataset {
            properties: self.properties.load().to_vec(),
            tenants: self.tenants.load().to_vec(),
            owners: self.owners.load().to_vec(),
            work_orders: self.work_orders.load().to_vec(),
            invoices: self.invoices.load().to_vec(),
            applications: self.applications.load().to_vec(),
            schedule_items: self.schedule_items.load().to_vec(),
        }
    }
}

/// A record type with a collection in [`Tables`].
pub trait Stored: Record {
    fn slot(tables: &Tables) -> &Slot<Self>;
}

macro_rules! impl_stored {
    ($( $ty:ty => $field:ident ),+ $(,)?) => {
        $(
            impl Stored for $ty {
                fn slot(tables: &Tables) -> &Slot<Self> {
                    &tables.$field
                }
            }
        )+
    };
}

impl_stored! {
    Property => properties,
    Tenant => tenants,
    Owner => owners,
    WorkOrder => work_orders,
    Invoice => invoices,
    Application => applications,
    ScheduleItem => schedule_items,
}
