use std::str::FromStr;
use std::time::Duration;

use propdash_core::types::EntityKind;

/// Simulated latency for application decisions, matching the dashboard.
pub const DEFAULT_APPLICATION_DELAY_MS: u64 = 1200;

/// When a status change becomes visible relative to its simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Wait out the latency, then apply. Readers see the old status until the
    /// request resolves.
    #[default]
    Deferred,
    /// Apply immediately, then wait out the latency before resolving.
    Optimistic,
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" => Ok(UpdatePolicy::Deferred),
            "optimistic" => Ok(UpdatePolicy::Optimistic),
            other => Err(format!(
                "unknown update policy '{other}', expected 'deferred' or 'optimistic'"
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Store configuration loaded from environment variables.
///
/// All fields have defaults that reproduce the dashboard's observed timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Latency before an application decision resolves (default: 1200 ms).
    pub application_delay: Duration,
    /// Latency for work order status changes (default: none).
    pub work_order_delay: Duration,
    /// Latency for invoice status changes (default: none).
    pub invoice_delay: Duration,
    /// Latency for any other kind (default: none).
    pub default_delay: Duration,
    pub policy: UpdatePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            application_delay: Duration::from_millis(DEFAULT_APPLICATION_DELAY_MS),
            work_order_delay: Duration::ZERO,
            invoice_delay: Duration::ZERO,
            default_delay: Duration::ZERO,
            policy: UpdatePolicy::Deferred,
        }
    }
}

impl StoreConfig {
    /// Every kind resolves without delay.
    pub fn instant() -> Self {
        Self {
            application_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Simulated latency for status changes on `kind`.
    pub fn delay_for(&self, kind: EntityKind) -> Duration {
        match kind {
            EntityKind::Application => self.application_delay,
            EntityKind::WorkOrder => self.work_order_delay,
            EntityKind::Invoice => self.invoice_delay,
            _ => self.default_delay,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `APPLICATION_DELAY_MS` | `1200`     |
    /// | `WORK_ORDER_DELAY_MS`  | `0`        |
    /// | `INVOICE_DELAY_MS`     | `0`        |
    /// | `DEFAULT_DELAY_MS`     | `0`        |
    /// | `UPDATE_POLICY`        | `deferred` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let millis = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| ConfigError {
                        var,
                        value: raw.clone(),
                        reason: e.to_string(),
                    }),
            }
        };

        let policy = match lookup("UPDATE_POLICY") {
            None => defaults.policy,
            Some(raw) => raw.parse::<UpdatePolicy>().map_err(|reason| ConfigError {
                var: "UPDATE_POLICY",
                value: raw.clone(),
                reason,
            })?,
        };

        Ok(Self {
            application_delay: millis("APPLICATION_DELAY_MS", defaults.application_delay)?,
            work_order_delay: millis("WORK_ORDER_DELAY_MS", defaults.work_order_delay)?,
            invoice_delay: millis("INVOICE_DELAY_MS", defaults.invoice_delay)?,
            default_delay: millis("DEFAULT_DELAY_MS", defaults.default_delay)?,
            policy,
        })
    }
}
