//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("App URL must start with http:// or https://")]
    InvalidAppUrl,

    #[error("App URL must use HTTPS in production")]
    AppUrlMustBeHttps,

    #[error("Session secret must be at least {0} bytes")]
    SessionSecretTooShort(usize),

    #[error("OAuth client for {0} is missing its secret")]
    IncompleteOAuthClient(&'static str),

    #[error("Invalid Stripe secret key format")]
    InvalidStripeKey,

    #[error("Invalid Creem API key format")]
    InvalidCreemKey,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid CMS dataset name")]
    InvalidDataset,
}
