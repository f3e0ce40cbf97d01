//! Environment-based configuration.

use std::collections::HashMap;

use anyhow::{Context, bail};

use billing_observability::{LogFormat, LogSettings};
use billing_orders::{DeclineCodeTable, OrderStatusTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LoggingConfig {
    pub fn settings(&self) -> LogSettings {
        LogSettings {
            default_filter: self.filter.clone(),
            format: self.format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    pub agreement_topic: String,
    pub order_status_topic: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            agreement_topic: "merchant.agreement".to_string(),
            order_status_topic: "order.status".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Mailbox receiving royalty report notifications.
    pub finance_email: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            finance_email: "finance@localhost".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupConfig {
    /// Entries added to (or replacing) the built-in decline code table.
    pub decline_code_overrides: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub broker: BrokerConfig,
    pub notifications: NotificationConfig,
    pub lookups: LookupConfig,
}

/// Translation tables shared by every order workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lookups {
    pub order_statuses: OrderStatusTable,
    pub decline_codes: DeclineCodeTable,
}

impl Config {
    /// Read `BILLING_*` variables from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables keep
    /// their defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        if let Some(filter) = var("BILLING_LOG") {
            config.logging.filter = filter;
        }
        if let Some(format) = var("BILLING_LOG_FORMAT") {
            config.logging.format = parse_format(&format)?;
        }
        if let Some(topic) = var("BILLING_AGREEMENT_TOPIC") {
            config.broker.agreement_topic = topic;
        }
        if let Some(topic) = var("BILLING_ORDER_STATUS_TOPIC") {
            config.broker.order_status_topic = topic;
        }
        if let Some(email) = var("BILLING_FINANCE_EMAIL") {
            if email.trim().is_empty() {
                bail!("BILLING_FINANCE_EMAIL must not be empty");
            }
            config.notifications.finance_email = email;
        }
        if let Some(raw) = var("BILLING_DECLINE_CODES") {
            config.lookups.decline_code_overrides = serde_json::from_str(&raw)
                .context("BILLING_DECLINE_CODES must be a JSON object of string codes")?;
        }

        Ok(config)
    }

    pub fn lookups(&self) -> Lookups {
        Lookups {
            order_statuses: OrderStatusTable::default(),
            decline_codes: DeclineCodeTable::default()
                .with_overrides(self.lookups.decline_code_overrides.clone()),
        }
    }
}

fn parse_format(raw: &str) -> anyhow::Result<LogFormat> {
    match raw.to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        other => bail!("unknown BILLING_LOG_FORMAT {other:?} (expected json or pretty)"),
    }
}
