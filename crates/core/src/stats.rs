//! Derived statistics over record collections.
//!
//! Every aggregate is computed on demand from an iterator of record
//! references, so the same function serves a whole collection and a filtered
//! view. Empty input produces zeros; averages never divide by zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{
    Application, Dataset, Invoice, Owner, Property, ScheduleItem, Tenant, WorkOrder,
};
use crate::status::{
    ApplicationStatus, InvoiceStatus, InvoiceType, Labeled, PropertyStatus, PropertyType,
    ScheduleType, TenantStatus, WorkOrderPriority, WorkOrderStatus,
};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Count per enumeration member. Every member is present, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally<K: Labeled + Serialize>(BTreeMap<K, usize>);

impl<K: Labeled + Serialize> Tally<K> {
    pub fn new() -> Self {
        Self(K::all().iter().map(|k| (*k, 0)).collect())
    }

    pub fn add(&mut self, key: K) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: K) -> usize {
        self.0.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl<K: Labeled + Serialize> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Labeled + Serialize> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ---------------------------------------------------------------------------
// Per-collection aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStats {
    pub total_properties: usize,
    pub total_units: u64,
    pub vacant_units: u64,
    /// Portfolio-wide occupied share of units, as a percentage.
    pub occupancy_rate: f64,
    pub by_type: Tally<PropertyType>,
    pub by_status: Tally<PropertyStatus>,
}

impl PropertyStats {
    pub fn compute<'a>(properties: impl IntoIterator<Item = &'a Property>) -> Self {
        let mut stats = Self {
            total_properties: 0,
            total_units: 0,
            vacant_units: 0,
            occupancy_rate: 0.0,
            by_type: Tally::new(),
            by_status: Tally::new(),
        };
        for p in properties {
            stats.total_properties += 1;
            stats.total_units += u64::from(p.units);
            stats.vacant_units += u64::from(p.vacant_units);
            stats.by_type.add(p.property_type);
            stats.by_status.add(p.status);
        }
        if stats.total_units > 0 {
            let occupied = stats.total_units.saturating_sub(stats.vacant_units);
            stats.occupancy_rate = occupied as f64 / stats.total_units as f64 * 100.0;
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStats {
    pub total: usize,
    pub by_status: Tally<TenantStatus>,
    pub average_credit_score: f64,
    /// Monthly rent owed by active tenants.
    pub active_rent_roll: Money,
}

impl TenantStats {
    pub fn compute<'a>(tenants: impl IntoIterator<Item = &'a Tenant>) -> Self {
        let mut by_status = Tally::new();
        let mut total = 0;
        let mut credit_sum = 0.0;
        let mut active_rent_roll = 0;
        for t in tenants {
            total += 1;
            by_status.add(t.status);
            credit_sum += f64::from(t.credit_score);
            if t.status == TenantStatus::Active {
                active_rent_roll += t.rent_amount;
            }
        }
        Self {
            total,
            by_status,
            average_credit_score: mean(credit_sum, total),
            active_rent_roll,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub total_owners: usize,
    pub total_units: u64,
    /// Sum of signed balances.
    pub total_balance: Money,
}

impl OwnerStats {
    pub fn compute<'a>(owners: impl IntoIterator<Item = &'a Owner>) -> Self {
        owners.into_iter().fold(
            Self {
                total_owners: 0,
                total_units: 0,
                total_balance: 0,
            },
            |mut acc, o| {
                acc.total_owners += 1;
                acc.total_units += u64::from(o.total_units);
                acc.total_balance += o.balance;
                acc
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderStats {
    pub total: usize,
    pub by_status: Tally<WorkOrderStatus>,
    pub by_priority: Tally<WorkOrderPriority>,
    /// Work orders not yet complete.
    pub open: usize,
}

impl WorkOrderStats {
    pub fn compute<'a>(work_orders: impl IntoIterator<Item = &'a WorkOrder>) -> Self {
        let mut by_status = Tally::new();
        let mut by_priority = Tally::new();
        let mut total = 0;
        for wo in work_orders {
            total += 1;
            by_status.add(wo.status);
            by_priority.add(wo.priority);
        }
        let open = total - by_status.get(WorkOrderStatus::Complete);
        Self {
            total,
            by_status,
            by_priority,
            open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub count: usize,
    /// Total billed.
    pub total: Money,
    /// Collected.
    pub paid: Money,
    pub pending: Money,
    pub overdue: Money,
    pub by_status: Tally<InvoiceStatus>,
    pub by_type: Tally<InvoiceType>,
}

impl InvoiceStats {
    pub fn compute<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> Self {
        let mut stats = Self {
            count: 0,
            total: 0,
            paid: 0,
            pending: 0,
            overdue: 0,
            by_status: Tally::new(),
            by_type: Tally::new(),
        };
        for inv in invoices {
            stats.count += 1;
            stats.total += inv.amount;
            match inv.status {
                InvoiceStatus::Paid => stats.paid += inv.amount,
                InvoiceStatus::Pending => stats.pending += inv.amount,
                InvoiceStatus::Overdue => stats.overdue += inv.amount,
            }
            stats.by_status.add(inv.status);
            stats.by_type.add(inv.invoice_type);
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub by_status: Tally<ApplicationStatus>,
    /// Pending Review plus In Progress.
    pub awaiting_decision: usize,
    pub average_credit_score: f64,
    pub average_income: f64,
}

impl ApplicationStats {
    pub fn compute<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        let mut by_status = Tally::new();
        let mut total = 0;
        let mut credit_sum = 0.0;
        let mut income_sum = 0.0;
        for app in applications {
            total += 1;
            by_status.add(app.status);
            credit_sum += f64::from(app.credit_score);
            income_sum += app.income as f64;
        }
        let awaiting_decision = by_status.get(ApplicationStatus::PendingReview)
            + by_status.get(ApplicationStatus::InProgress);
        Self {
            total,
            by_status,
            awaiting_decision,
            average_credit_score: mean(credit_sum, total),
            average_income: mean(income_sum, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total: usize,
    pub by_type: Tally<ScheduleType>,
}

impl ScheduleStats {
    pub fn compute<'a>(items: impl IntoIterator<Item = &'a ScheduleItem>) -> Self {
        let by_type: Tally<ScheduleType> = items.into_iter().map(|s| s.schedule_type).collect();
        Self {
            total: by_type.total(),
            by_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Headline numbers for the dashboard landing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_properties: usize,
    pub total_units: u64,
    pub vacant_units: u64,
    pub active_tenants: usize,
    pub pending_work_orders: usize,
    pub in_progress_work_orders: usize,
    pub overdue_invoices: usize,
    pub pending_applications: usize,
    pub today_schedule: usize,
    /// Rent owed by active tenants.
    pub monthly_revenue: Money,
}

impl DashboardStats {
    pub fn compute(data: &Dataset, today: NaiveDate) -> Self {
        let properties = PropertyStats::compute(&data.properties);
        let tenants = TenantStats::compute(&data.tenants);
        let work_orders = WorkOrderStats::compute(&data.work_orders);
        let invoices = InvoiceStats::compute(&data.invoices);
        let applications = ApplicationStats::compute(&data.applications);

        Self {
            total_properties: properties.total_properties,
            total_units: properties.total_units,
            vacant_units: properties.vacant_units,
            active_tenants: tenants.by_status.get(TenantStatus::Active),
            pending_work_orders: work_orders.by_status.get(WorkOrderStatus::Pending),
            in_progress_work_orders: work_orders.by_status.get(WorkOrderStatus::InProgress),
            overdue_invoices: invoices.by_status.get(InvoiceStatus::Overdue),
            pending_applications: applications.awaiting_decision,
            today_schedule: data.schedule_items.iter().filter(|s| s.date == today).count(),
            monthly_revenue: tenants.active_rent_roll,
        }
    }
}

// ---------------------------------------------------------------------------
// Credit rating
// ---------------------------------------------------------------------------

/// Banding used to colour credit scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CreditRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditRating {
    pub fn from_score(score: u16) -> Self {
        match score {
            750..=u16::MAX => CreditRating::Excellent,
            700..=749 => CreditRating::Good,
            650..=699 => CreditRating::Fair,
            _ => CreditRating::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreditRating::Excellent => "Excellent",
            CreditRating::Good => "Good",
            CreditRating::Fair => "Fair",
            CreditRating::Poor => "Poor",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
