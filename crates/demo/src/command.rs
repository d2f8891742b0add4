//! Parsing and execution of demo commands.
//!
//! Every command produces a JSON value, printed by the binary.

use std::str::FromStr;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use propdash_core::filter::{
    ApplicationCriteria, Criteria, InvoiceCriteria, OwnerCriteria, PropertyCriteria,
    ScheduleCriteria, TenantCriteria, WorkOrderCriteria,
};
use propdash_core::models::{Application, Invoice, ScheduleItem, StatusRecord, Tenant, WorkOrder};
use propdash_core::notice::Announce;
use propdash_core::schedule::{agenda, day_label};
use propdash_core::stats::{
    ApplicationStats, DashboardStats, InvoiceStats, OwnerStats, PropertyStats, ScheduleStats,
    TenantStats, WorkOrderStats,
};
use propdash_core::status::Labeled;
use propdash_core::transitions::Transitions;
use propdash_core::types::EntityKind;
use propdash_store::{Store, Stored};
use serde::Serialize;
use serde_json::{json, Value};

pub const USAGE: &str = "\
usage: propdash-demo [command]

commands:
  stats                                      dashboard and per-collection figures (default)
  list <kind> [search] [dimension=value ...] filtered records of one kind
  set-status <kind> <id> <status> [--strict] change a record's status
  agenda                                     schedule grouped by day

kinds: property, tenant, owner, work_order, invoice, application, schedule_item";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stats,
    List {
        kind: EntityKind,
        search: String,
        filters: Vec<(String, String)>,
    },
    SetStatus {
        kind: EntityKind,
        id: String,
        status: String,
        strict: bool,
    },
    Agenda,
}

impl Command {
    /// Parse arguments following the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> anyhow::Result<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            [] | ["stats"] => Ok(Command::Stats),
            ["agenda"] => Ok(Command::Agenda),
            ["list", kind, rest @ ..] => {
                let kind = EntityKind::from_str(kind)?;
                let mut search = Vec::new();
                let mut filters = Vec::new();
                for arg in rest {
                    match arg.split_once('=') {
                        Some((dimension, value)) => {
                            filters.push((dimension.to_string(), value.to_string()))
                        }
                        None => search.push(*arg),
                    }
                }
                Ok(Command::List {
                    kind,
                    search: search.join(" "),
                    filters,
                })
            }
            ["set-status", kind, id, status, rest @ ..] => {
                let strict = match rest {
                    [] => false,
                    ["--strict"] => true,
                    other => bail!("unexpected arguments: {}", other.join(" ")),
                };
                Ok(Command::SetStatus {
                    kind: EntityKind::from_str(kind)?,
                    id: id.to_string(),
                    status: status.to_string(),
                    strict,
                })
            }
            _ => bail!("{USAGE}"),
        }
    }

    pub async fn run(&self, store: &Store, today: NaiveDate) -> anyhow::Result<Value> {
        match self {
            Command::Stats => stats_json(store, today),
            Command::Agenda => agenda_json(store, today),
            Command::List {
                kind,
                search,
                filters,
            } => list(store, *kind, search, filters),
            Command::SetStatus {
                kind,
                id,
                status,
                strict,
            } => match kind {
                EntityKind::WorkOrder => set_status::<WorkOrder>(store, id, status, *strict).await,
                EntityKind::Invoice => set_status::<Invoice>(store, id, status, *strict).await,
                EntityKind::Application => {
                    set_status::<Application>(store, id, status, *strict).await
                }
                other => bail!("{} records have no status to change", other.label()),
            },
        }
    }
}

fn list(
    store: &Store,
    kind: EntityKind,
    search: &str,
    filters: &[(String, String)],
) -> anyhow::Result<Value> {
    match kind {
        EntityKind::Property => list_with(store, PropertyCriteria::default(), search, filters),
        EntityKind::Tenant => list_with(store, TenantCriteria::default(), search, filters),
        EntityKind::Owner => list_with(store, OwnerCriteria::default(), search, filters),
        EntityKind::WorkOrder => list_with(store, WorkOrderCriteria::default(), search, filters),
        EntityKind::Invoice => {
            let tenants = store.snapshot::<Tenant>();
            list_with(store, InvoiceCriteria::new(tenants.iter()), search, filters)
        }
        EntityKind::Application => {
            list_with(store, ApplicationCriteria::default(), search, filters)
        }
        EntityKind::ScheduleItem => list_with(store, ScheduleCriteria::default(), search, filters),
    }
}

fn list_with<C>(
    store: &Store,
    mut criteria: C,
    search: &str,
    filters: &[(String, String)],
) -> anyhow::Result<Value>
where
    C: Criteria,
    C::Record: Stored + Serialize,
{
    criteria.set_search(search);
    for (dimension, value) in filters {
        criteria.set_filter(dimension, value)?;
    }
    Ok(serde_json::to_value(store.filtered(&criteria))?)
}

async fn set_status<E>(store: &Store, id: &str, status: &str, strict: bool) -> anyhow::Result<Value>
where
    E: Stored + StatusRecord + Announce + Serialize,
    E::Status: Transitions,
{
    let result = if strict {
        store.update_status_checked::<E>(id, status).await
    } else {
        store.update_status::<E>(id, status).await
    };
    let change = result.with_context(|| format!("Could not update {} {id}", E::KIND))?;

    Ok(json!({
        "previous": change.previous.label(),
        "record": change.record,
    }))
}

fn stats_json(store: &Store, today: NaiveDate) -> anyhow::Result<Value> {
    let data = store.dataset();
    Ok(json!({
        "dashboard": DashboardStats::compute(&data, today),
        "properties": PropertyStats::compute(&data.properties),
        "tenants": TenantStats::compute(&data.tenants),
        "owners": OwnerStats::compute(&data.owners),
        "workOrders": WorkOrderStats::compute(&data.work_orders),
        "invoices": InvoiceStats::compute(&data.invoices),
        "applications": ApplicationStats::compute(&data.applications),
        "schedule": ScheduleStats::compute(&data.schedule_items),
    }))
}

fn agenda_json(store: &Store, today: NaiveDate) -> anyhow::Result<Value> {
    let items = store.snapshot::<ScheduleItem>();
    let days = agenda(items.iter())
        .into_iter()
        .map(|day| {
            Ok(json!({
                "label": day_label(day.date, today),
                "date": day.date,
                "items": serde_json::to_value(&day.items)?,
            }))
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    Ok(Value::Array(days))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn no_arguments_means_stats() {
        assert_eq!(Command::parse::<&str>(&[]).unwrap(), Command::Stats);
    }

    #[test]
    fn list_splits_search_from_filters() {
        let cmd = Command::parse(&["list", "invoice", "leilani", "status=Pending", "type=Rent"]).unwrap();
        assert_eq!(
            cmd,
            Command::List {
                kind: EntityKind::Invoice,
                search: "leilani".into(),
                filters: vec![
                    ("status".into(), "Pending".into()),
                    ("type".into(), "Rent".into())
                ],
            }
        );
    }

    #[test]
    fn multi_word_search_is_joined() {
        assert_matches!(
            Command::parse(&["list", "work_order", "garbage", "disposal"]).unwrap(),
            Command::List { search, .. } if search == "garbage disposal"
        );
    }

    #[test]
    fn set_status_accepts_strict_flag() {
        assert_matches!(
            Command::parse(&["set-status", "application", "APP001", "Approved", "--strict"]).unwrap(),
            Command::SetStatus { strict: true, .. }
        );
        assert!(Command::parse(&["set-status", "application", "APP001", "Approved", "--force"]).is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Command::parse(&["list", "lease"]).is_err());
    }

    #[test]
    fn unknown_command_shows_usage() {
        let err = Command::parse(&["dance"]).unwrap_err();
        assert!(err.to_string().contains("usage:"));
    }
}
