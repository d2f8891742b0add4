//! End-to-end runs of demo commands against the seeded store.

use std::sync::Arc;

use propdash_core::fixtures;
use propdash_demo::command::Command;
use propdash_events::NotificationBus;
use propdash_store::{NoLatency, Store, StoreConfig};

fn store() -> Store {
    Store::new(
        fixtures::seed().expect("seed should load"),
        StoreConfig::instant(),
        Arc::new(NoLatency),
        Arc::new(NotificationBus::default()),
    )
}

async fn run(store: &Store, args: &[&str]) -> anyhow::Result<serde_json::Value> {
    Command::parse(args)?.run(store, fixtures::demo_today()).await
}

#[tokio::test]
async fn stats_reports_invoice_totals() {
    let out = run(&store(), &["stats"]).await.unwrap();
    assert_eq!(out["invoices"]["count"], 8);
    assert_eq!(out["invoices"]["overdue"], 2400);
    assert_eq!(out["dashboard"]["overdueInvoices"], 1);
    assert_eq!(out["dashboard"]["totalProperties"], 6);
}

#[tokio::test]
async fn list_tenants_by_case_varied_search() {
    let out = run(&store(), &["list", "tenant", "WoNg"]).await.unwrap();
    let tenants = out.as_array().unwrap();
    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0]["lastName"], "Wong");
}

#[tokio::test]
async fn list_invoices_with_filters() {
    let out = run(&store(), &["list", "invoice", "status=Pending", "type=Rent"])
        .await
        .unwrap();
    let ids: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["INV001", "INV002", "INV005"]);
}

#[tokio::test]
async fn unknown_filter_dimension_fails() {
    let err = run(&store(), &["list", "owner", "status=Active"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("status"));
}

#[tokio::test]
async fn set_status_then_stats_reflects_change() {
    let store = store();
    let out = run(&store, &["set-status", "invoice", "INV004", "Paid"])
        .await
        .unwrap();
    assert_eq!(out["previous"], "Overdue");
    assert_eq!(out["record"]["status"], "Paid");

    let stats = run(&store, &["stats"]).await.unwrap();
    assert_eq!(stats["dashboard"]["overdueInvoices"], 0);
    assert_eq!(stats["invoices"]["overdue"], 0);
}

#[tokio::test]
async fn strict_set_status_refuses_terminal_application() {
    let store = store();
    let err = run(
        &store,
        &["set-status", "application", "APP003", "Denied", "--strict"],
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("APP003"));
}

#[tokio::test]
async fn properties_have_no_status_command() {
    assert!(run(&store(), &["set-status", "property", "P001", "Active"])
        .await
        .is_err());
}

#[tokio::test]
async fn agenda_is_grouped_by_day() {
    let out = run(&store(), &["agenda"]).await.unwrap();
    let days = out.as_array().unwrap();
    assert!(!days.is_empty());
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert!(days.iter().all(|d| !d["items"].as_array().unwrap().is_empty()));
}
