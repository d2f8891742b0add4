pub mod config;
pub mod latency;
pub mod locks;
pub mod store;
pub mod tables;

pub use config::{ConfigError, StoreConfig, UpdatePolicy};
pub use latency::{Latency, NoLatency, TokioLatency};
pub use store::{StatusChange, Store};
pub use tables::Stored;
