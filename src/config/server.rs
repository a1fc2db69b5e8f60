//! Listener and public-site settings.

use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};

use super::error::ValidationError;

/// Where the API listens and how the public site is addressed.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Production turns on secure cookies, JSON logs and the HTTPS check.
    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Public origin of the site. OAuth redirect URIs and checkout return
    /// URLs are built from it.
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Comma-separated origins allowed to call the API with credentials.
    pub cors_origins: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Base URL without a trailing slash.
    pub fn app_url(&self) -> &str {
        self.app_url.trim_end_matches('/')
    }

    /// Configured CORS origins; blank entries are dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        let https = self.app_url.starts_with("https://");
        if !https && !self.app_url.starts_with("http://") {
            return Err(ValidationError::InvalidAppUrl);
        }
        if self.is_production() && !https {
            return Err(ValidationError::AppUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            app_url: default_app_url(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,directory_site=debug,tower_http=info".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_app_url(environment: Environment, app_url: &str) -> ServerConfig {
        ServerConfig {
            environment,
            app_url: app_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_serve_local_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert!(!config.is_production());
        assert_eq!(config.app_url(), "http://localhost:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_host_is_an_error_not_a_panic() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn app_url_loses_trailing_slash() {
        let config = with_app_url(Environment::Production, "https://dir.example.com/");
        assert_eq!(config.app_url(), "https://dir.example.com");
    }

    #[test]
    fn cors_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: Some(" https://dir.example.com, ,http://localhost:3000,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://dir.example.com", "http://localhost:3000"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn app_url_needs_a_scheme() {
        let config = with_app_url(Environment::Development, "dir.example.com");
        assert!(matches!(config.validate(), Err(ValidationError::InvalidAppUrl)));
    }

    #[test]
    fn production_needs_https() {
        let config = with_app_url(Environment::Production, "http://dir.example.com");
        assert!(matches!(
            config.validate(),
            Err(ValidationError::AppUrlMustBeHttps)
        ));
        assert!(with_app_url(Environment::Production, "https://dir.example.com")
            .validate()
            .is_ok());
    }
}
