//! # officex
//!
//! Typed wire contract for OfficeX drives plus an in-memory reference
//! executor. The member crates are re-exported as-is:
//!
//! - [`officex_core`]: errors, configuration, identifiers, pagination, envelopes
//! - [`officex_entity`]: stored records and their front-end compositions
//! - [`officex_api`]: directory actions, route shapes, webhooks, iframe, checkout
//! - [`officex_service`]: the directory executor

pub use officex_api;
pub use officex_core;
pub use officex_entity;
pub use officex_service;

use tracing_subscriber::{EnvFilter, fmt};

use officex_core::config::logging::LoggingConfig;
use officex_core::error::AppError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails if a subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_thread_ids(true)
            .try_init(),
        "pretty" => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init(),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown log format '{other}', expected 'json' or 'pretty'"
            )));
        }
    };

    result.map_err(|e| AppError::configuration(format!("Failed to install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_is_rejected() {
        let config = LoggingConfig {
            format: "xml".into(),
            ..LoggingConfig::default()
        };
        let err = init_logging(&config).unwrap_err();
        assert_eq!(err.kind, officex_core::error::ErrorKind::Configuration);
    }
}
