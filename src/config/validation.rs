//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and log settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a usable http(s) URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("observability.log_level: '{0}' is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Check every field, collecting all problems.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_base_url(&mut errors, "upstream.drive_api_base", &config.upstream.drive_api_base);
    check_base_url(&mut errors, "upstream.userinfo_url", &config.upstream.userinfo_url);

    if let Some(proxy) = &config.upstream.proxy_url {
        if reqwest::Proxy::all(proxy.as_str()).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "upstream.proxy_url",
                value: proxy.clone(),
            });
        }
    }

    if config.upstream.user_agent.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "upstream.user_agent" });
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

// Path segments get appended to these, so the URL must be hierarchical.
fn check_base_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let usable = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
        .unwrap_or(false);
    if !usable {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
