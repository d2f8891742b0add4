//! `propdash-demo` -- run dashboard queries and status changes against the
//! in-memory store.
//!
//! # Environment variables
//!
//! | Variable               | Default       | Description                              |
//! |------------------------|---------------|------------------------------------------|
//! | `FIXTURES_PATH`        | built-in seed | JSON dataset to load instead of the seed |
//! | `DEMO_TODAY`           | `2025-01-19`  | Reference date for stats and agenda      |
//! | `APPLICATION_DELAY_MS` | `1200`        | Simulated latency for applications       |
//! | `WORK_ORDER_DELAY_MS`  | `0`           | Simulated latency for work orders        |
//! | `INVOICE_DELAY_MS`     | `0`           | Simulated latency for invoices           |
//! | `DEFAULT_DELAY_MS`     | `0`           | Simulated latency for other kinds        |
//! | `UPDATE_POLICY`        | `deferred`    | `deferred` or `optimistic`               |

use std::sync::Arc;

use propdash_demo::command::Command;
use propdash_demo::config::DemoConfig;
use propdash_demo::toasts;
use propdash_events::NotificationBus;
use propdash_store::{Store, TokioLatency};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "propdash_demo=info,propdash_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DemoConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let dataset = config.load_dataset()?;
    tracing::info!(
        today = %config.today,
        policy = ?config.store.policy,
        fixtures = ?config.fixtures_path,
        "Starting propdash-demo",
    );

    let bus = Arc::new(NotificationBus::default());
    let logger = toasts::spawn_logger(&bus);
    let store = Store::new(
        dataset,
        config.store.clone(),
        Arc::new(TokioLatency),
        Arc::clone(&bus),
    );

    let result = command.run(&store, config.today).await;

    // Close the bus so the logger drains and exits.
    drop(store);
    drop(bus);
    let _ = logger.await;

    let output = result?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
