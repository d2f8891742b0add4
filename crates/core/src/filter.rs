//! Search and categorical filtering over record collections.
//!
//! Every collection view combines a free-text search (case-insensitive
//! substring match over a fixed set of text fields per entity) with zero or
//! more categorical selections. The selection value `"all"` disables that
//! dimension. Filtering never reorders: results follow input order.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::models::{
    Application, Invoice, Owner, Property, Record, ScheduleItem, Tenant, WorkOrder,
};
use crate::status::{
    ApplicationStatus, InvoiceStatus, InvoiceType, Labeled, PropertyType, ScheduleType,
    TenantStatus, WorkOrderPriority, WorkOrderStatus,
};
use crate::types::{EntityId, EntityKind};

/// Selection value that disables a categorical filter.
pub const ALL_SENTINEL: &str = "all";

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Lowercased search needle. Empty input matches everything.
///
/// Whitespace is kept as typed, so `"wong "` only matches fields that
/// contain a trailing space after "wong".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchText(String);

impl SearchText {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when blank, or when any field contains the needle ignoring case.
    pub fn matches_any<I, S>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.is_blank()
            || fields
                .into_iter()
                .any(|f| f.as_ref().to_lowercase().contains(&self.0))
    }
}

/// One categorical filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Labeled> Selection<T> {
    /// Parse `"all"` or an exact label of `T`.
    pub fn parse(value: &str) -> Result<Self, crate::status::UnknownLabel> {
        if value == ALL_SENTINEL {
            Ok(Selection::All)
        } else {
            T::from_label(value).map(Selection::Only)
        }
    }

    pub fn admits(&self, value: T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => *wanted == value,
        }
    }
}

/// A predicate set for one collection.
///
/// `set_search` and `set_filter` are the intents the presentation layer
/// sends as the user types or picks a dropdown value.
pub trait Criteria {
    type Record: Record;

    fn matches(&self, record: &Self::Record) -> bool;

    fn set_search(&mut self, text: &str);

    /// Set a categorical dimension by name (`"status"`, `"type"`,
    /// `"priority"`) to a label or `"all"`.
    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError>;

    fn with_search(mut self, text: &str) -> Self
    where
        Self: Sized,
    {
        self.set_search(text);
        self
    }

    fn with_filter(mut self, dimension: &str, value: &str) -> Result<Self, CoreError>
    where
        Self: Sized,
    {
        self.set_filter(dimension, value)?;
        Ok(self)
    }
}

/// Matching records, in input order.
pub fn filter<'a, C, I>(records: I, criteria: &C) -> Vec<&'a C::Record>
where
    C: Criteria,
    I: IntoIterator<Item = &'a C::Record>,
{
    records
        .into_iter()
        .filter(|r| criteria.matches(r))
        .collect()
}

fn set_selection<T: Labeled>(
    slot: &mut Selection<T>,
    dimension: &str,
    value: &str,
) -> Result<(), CoreError> {
    *slot = Selection::parse(value)
        .map_err(|e| CoreError::Validation(format!("Invalid {dimension} filter: {e}")))?;
    Ok(())
}

fn unknown_dimension(entity: EntityKind, dimension: &str) -> CoreError {
    CoreError::UnknownFilter {
        entity,
        dimension: dimension.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Per-entity criteria
// ---------------------------------------------------------------------------

/// Searches name, address and city; filters by `type`.
#[derive(Debug, Clone, Default)]
pub struct PropertyCriteria {
    pub search: SearchText,
    pub property_type: Selection<PropertyType>,
}

impl Criteria for PropertyCriteria {
    type Record = Property;

    fn matches(&self, p: &Property) -> bool {
        self.search.matches_any([&p.name, &p.address, &p.city])
            && self.property_type.admits(p.property_type)
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError> {
        match dimension {
            "type" => set_selection(&mut self.property_type, dimension, value),
            _ => Err(unknown_dimension(Property::KIND, dimension)),
        }
    }
}

/// Searches full name, email and unit; filters by `status`.
#[derive(Debug, Clone, Default)]
pub struct TenantCriteria {
    pub search: SearchText,
    pub status: Selection<TenantStatus>,
}

impl Criteria for TenantCriteria {
    type Record = Tenant;

    fn matches(&self, t: &Tenant) -> bool {
        self.search.matches_any([&t.full_name(), &t.email, &t.unit]) && self.status.admits(t.status)
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError> {
        match dimension {
            "status" => set_selection(&mut self.status, dimension, value),
            _ => Err(unknown_dimension(Tenant::KIND, dimension)),
        }
    }
}

/// Searches full name and email. Owners have no categorical dimensions.
#[derive(Debug, Clone, Default)]
pub struct OwnerCriteria {
    pub search: SearchText,
}

impl Criteria for OwnerCriteria {
    type Record = Owner;

    fn matches(&self, o: &Owner) -> bool {
        self.search.matches_any([&o.full_name(), &o.email])
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, _value: &str) -> Result<(), CoreError> {
        Err(unknown_dimension(Owner::KIND, dimension))
    }
}

/// Searches title, description and assignee; filters by `status` and `priority`.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderCriteria {
    pub search: SearchText,
    pub status: Selection<WorkOrderStatus>,
    pub priority: Selection<WorkOrderPriority>,
}

impl Criteria for WorkOrderCriteria {
    type Record = WorkOrder;

    fn matches(&self, wo: &WorkOrder) -> bool {
        self.search
            .matches_any([&wo.title, &wo.description, &wo.assigned_to])
            && self.status.admits(wo.status)
            && self.priority.admits(wo.priority)
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError> {
        match dimension {
            "status" => set_selection(&mut self.status, dimension, value),
            "priority" => set_selection(&mut self.priority, dimension, value),
            _ => Err(unknown_dimension(WorkOrder::KIND, dimension)),
        }
    }
}

/// Searches invoice number and the billed tenant's full name; filters by
/// `status` and `type`.
///
/// Tenant names are captured when the criteria are built. An invoice whose
/// tenant id dangles is matched on its number alone.
#[derive(Debug, Clone, Default)]
pub struct InvoiceCriteria {
    pub search: SearchText,
    pub status: Selection<InvoiceStatus>,
    pub invoice_type: Selection<InvoiceType>,
    tenant_names: HashMap<EntityId, String>,
}

impl InvoiceCriteria {
    pub fn new<'a>(tenants: impl IntoIterator<Item = &'a Tenant>) -> Self {
        Self {
            tenant_names: tenants
                .into_iter()
                .map(|t| (t.id.clone(), t.full_name()))
                .collect(),
            ..Self::default()
        }
    }
}

impl Criteria for InvoiceCriteria {
    type Record = Invoice;

    fn matches(&self, inv: &Invoice) -> bool {
        let tenant = self.tenant_names.get(&inv.tenant_id);
        self.search
            .matches_any(std::iter::once(&inv.invoice_number).chain(tenant))
            && self.status.admits(inv.status)
            && self.invoice_type.admits(inv.invoice_type)
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError> {
        match dimension {
            "status" => set_selection(&mut self.status, dimension, value),
            "type" => set_selection(&mut self.invoice_type, dimension, value),
            _ => Err(unknown_dimension(Invoice::KIND, dimension)),
        }
    }
}

/// Searches applicant name and email; filters by `status`.
#[derive(Debug, Clone, Default)]
pub struct ApplicationCriteria {
    pub search: SearchText,
    pub status: Selection<ApplicationStatus>,
}

impl Criteria for ApplicationCriteria {
    type Record = Application;

    fn matches(&self, app: &Application) -> bool {
        self.search.matches_any([&app.applicant_name, &app.email]) && self.status.admits(app.status)
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError> {
        match dimension {
            "status" => set_selection(&mut self.status, dimension, value),
            _ => Err(unknown_dimension(Application::KIND, dimension)),
        }
    }
}

/// Searches title and notes; filters by `type`.
#[derive(Debug, Clone, Default)]
pub struct ScheduleCriteria {
    pub search: SearchText,
    pub schedule_type: Selection<ScheduleType>,
}

impl Criteria for ScheduleCriteria {
    type Record = ScheduleItem;

    fn matches(&self, item: &ScheduleItem) -> bool {
        self.search
            .matches_any(std::iter::once(&item.title).chain(item.notes.as_ref()))
            && self.schedule_type.admits(item.schedule_type)
    }

    fn set_search(&mut self, text: &str) {
        self.search = SearchText::new(text);
    }

    fn set_filter(&mut self, dimension: &str, value: &str) -> Result<(), CoreError> {
        match dimension {
            "type" => set_selection(&mut self.schedule_type, dimension, value),
            _ => Err(unknown_dimension(ScheduleItem::KIND, dimension)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
