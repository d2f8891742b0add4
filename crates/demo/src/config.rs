use std::path::PathBuf;

use chrono::NaiveDate;
use propdash_core::fixtures;
use propdash_core::models::Dataset;
use propdash_store::StoreConfig;

#[derive(Debug, thiserror::Error)]
pub enum DemoConfigError {
    #[error(transparent)]
    Store(#[from] propdash_store::ConfigError),

    #[error("Invalid value '{0}' for DEMO_TODAY: expected YYYY-MM-DD")]
    InvalidToday(String),
}

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// JSON payload replacing the built-in seed.
    pub fixtures_path: Option<PathBuf>,
    /// Date the agenda and "due soon" figures are relative to.
    pub today: NaiveDate,
    pub store: StoreConfig,
}

impl DemoConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var         | Default          |
    /// |-----------------|------------------|
    /// | `FIXTURES_PATH` | built-in seed    |
    /// | `DEMO_TODAY`    | `2025-01-19`     |
    ///
    /// plus everything [`StoreConfig::from_env`] reads.
    pub fn from_env() -> Result<Self, DemoConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoConfigError> {
        let fixtures_path = lookup("FIXTURES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let today = match lookup("DEMO_TODAY") {
            None => fixtures::demo_today(),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| DemoConfigError::InvalidToday(raw))?,
        };

        Ok(Self {
            fixtures_path,
            today,
            store: StoreConfig::from_vars(&lookup)?,
        })
    }

    /// The configured fixture payload, or the built-in seed.
    pub fn load_dataset(&self) -> anyhow::Result<Dataset> {
        use anyhow::Context;

        match &self.fixtures_path {
            None => Ok(fixtures::seed()?),
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
                fixtures::from_json(&json)
                    .with_context(|| format!("Invalid fixtures in {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_use_built_in_seed() {
        let config = DemoConfig::from_vars(|_| None).unwrap();
        assert_eq!(config.fixtures_path, None);
        assert_eq!(config.today, fixtures::demo_today());
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.load_dataset().unwrap().invoices.len(), 8);
    }

    #[test]
    fn today_override_is_parsed() {
        let config = DemoConfig::from_vars(|k| (k == "DEMO_TODAY").then(|| "2025-03-01".into())).unwrap();
        assert_eq!(config.today.to_string(), "2025-03-01");
    }

    #[test]
    fn bad_today_is_rejected() {
        assert_matches!(
            DemoConfig::from_vars(|k| (k == "DEMO_TODAY").then(|| "tomorrow".into())),
            Err(DemoConfigError::InvalidToday(v)) if v == "tomorrow"
        );
    }

    #[test]
    fn store_errors_pass_through() {
        assert_matches!(
            DemoConfig::from_vars(|k| (k == "UPDATE_POLICY").then(|| "later".into())),
            Err(DemoConfigError::Store(_))
        );
    }

    #[test]
    fn missing_fixture_file_is_reported() {
        let config = DemoConfig {
            fixtures_path: Some(PathBuf::from("/nonexistent/fixtures.json")),
            today: fixtures::demo_today(),
            store: StoreConfig::default(),
        };
        let err = config.load_dataset().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fixtures.json"));
    }
}
