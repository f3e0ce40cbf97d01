//! Infrastructure around the billing domain crates: configuration, document
//! storage, repositories, external service contracts and workflows.

pub mod config;
pub mod error;
pub mod external;
pub mod repositories;
pub mod services;
pub mod store;


use std::sync::Arc;

pub use config::{Config, Lookups};
pub use error::{ServiceError, ServiceResult};

/// Load configuration from the environment, initialize tracing and build the
/// shared translation tables.
pub fn bootstrap() -> anyhow::Result<(Config, Arc<Lookups>)> {
    let config = Config::from_env()?;
    billing_observability::init_with(&config.logging.settings());

    let lookups = Arc::new(config.lookups());
    tracing::info!(
        decline_codes = lookups.decline_codes.len(),
        order_status_topic = %config.broker.order_status_topic,
        "billing layer bootstrapped"
    );
    Ok((config, lookups))
}
