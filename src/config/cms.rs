//! Content store configuration (Sanity)

use serde::Deserialize;

use super::error::ValidationError;

/// Sanity project settings
#[derive(Debug, Clone, Deserialize)]
pub struct CmsConfig {
    /// Sanity project ID
    pub project_id: String,

    /// Dataset name
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// API version date
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Write token; required for mutations
    pub api_token: String,
}

impl CmsConfig {
    /// Base URL for the data API of this project.
    pub fn data_url(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v{}/data",
            self.project_id, self.api_version
        )
    }

    /// Validate CMS configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.is_empty() {
            return Err(ValidationError::MissingRequired("CMS__PROJECT_ID"));
        }
        if self.api_token.is_empty() {
            return Err(ValidationError::MissingRequired("CMS__API_TOKEN"));
        }
        let valid_dataset = !self.dataset.is_empty()
            && self
                .dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid_dataset {
            return Err(ValidationError::InvalidDataset);
        }
        Ok(())
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            api_token: String::new(),
        }
    }
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2021-10-21".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CmsConfig {
        CmsConfig {
            project_id: "abc123".to_string(),
            api_token: "sk_token".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_data_url() {
        assert_eq!(
            valid().data_url(),
            "https://abc123.api.sanity.io/v2021-10-21/data"
        );
    }

    #[test]
    fn test_validation_missing_project() {
        let config = CmsConfig {
            project_id: String::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_dataset() {
        let config = CmsConfig {
            dataset: "Prod Data".to_string(),
            ..valid()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidDataset)));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }
}
