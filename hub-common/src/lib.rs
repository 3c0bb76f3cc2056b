//! Common types and utilities shared across Coupon Hub crates.
//!
//! This crate defines the shared error type and the observability helpers
//! used throughout the workspace. It is intentionally lightweight so that
//! every crate can depend on it without heavy transitive costs.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`HubError`] and [`Result`]: Shared error handling

pub mod observability;

/// Error types used across the Coupon Hub system.
#[derive(thiserror::Error, Debug)]
pub enum HubError {
    /// The remote coupon service rejected or failed a request.
    #[error("Service error: {0}")]
    Service(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The terminal UI failed to initialise or draw.
    #[error("UI error: {0}")]
    Ui(#[from] anyhow::Error),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`HubError`].
pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_prefixed_by_kind() {
        let service = HubError::Service("503 from upstream".into());
        assert_eq!(service.to_string(), "Service error: 503 from upstream");

        let config = HubError::Config("missing base_url".into());
        assert_eq!(config.to_string(), "Configuration error: missing base_url");

        assert_eq!(HubError::Timeout.to_string(), "Timeout occurred");
    }

    #[test]
    fn anyhow_errors_convert_to_ui_errors() {
        fn draw() -> anyhow::Result<()> {
            Err(anyhow::anyhow!("terminal too small"))
        }
        let err: HubError = draw().unwrap_err().into();
        assert!(matches!(err, HubError::Ui(_)));
    }
}
