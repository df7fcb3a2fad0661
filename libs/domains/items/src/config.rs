use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

pub const DEFAULT_COLLECTION: &str = "items";
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Repository settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemsConfig {
    /// Collection the repository is bound to
    pub collection: String,
    /// Deadline applied to every store call
    pub operation_timeout: Duration,
}

impl ItemsConfig {
    /// Zero is ignored and the current deadline is kept
    pub fn with_timeout(mut self, operation_timeout: Duration) -> Self {
        if operation_timeout.is_zero() {
            tracing::warn!(
                kept_ms = self.operation_timeout.as_millis() as u64,
                "Ignoring zero operation timeout"
            );
        } else {
            self.operation_timeout = operation_timeout;
        }
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl FromEnv for ItemsConfig {
    /// - `ITEMS_COLLECTION` (default: "items")
    /// - `ITEMS_OPERATION_TIMEOUT_SECS` (default: 10, must be positive)
    fn from_env() -> Result<Self, ConfigError> {
        let collection = env_or_default("ITEMS_COLLECTION", DEFAULT_COLLECTION);
        let timeout_secs: u64 = env_parse(
            "ITEMS_OPERATION_TIMEOUT_SECS",
            DEFAULT_OPERATION_TIMEOUT.as_secs(),
        )?;

        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "ITEMS_OPERATION_TIMEOUT_SECS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            collection,
            operation_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
