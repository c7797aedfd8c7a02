//! Blob storage configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Where uploaded images are kept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    Memory,
}

/// Blob storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory uploaded files are written beneath
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// URL prefix the stored files are reachable under
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Route the server mounts `base_path` on; not mounted when empty
    #[serde(default = "default_serve_path")]
    pub serve_path: String,
}

impl StorageConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::Local && self.base_path.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BASE_PATH"));
        }
        if self.public_base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__PUBLIC_BASE_URL"));
        }
        if *environment == Environment::Production && !self.public_base_url.starts_with("https://") {
            return Err(ValidationError::StorageUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            base_path: default_base_path(),
            public_base_url: default_public_base_url(),
            serve_path: default_serve_path(),
        }
    }
}

fn default_base_path() -> String {
    "./data/media".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_serve_path() -> String {
    "/media".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_for_development() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Local);
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_production_requires_https() {
        let config = StorageConfig::default();
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::StorageUrlMustBeHttps)
        );

        let config = StorageConfig {
            public_base_url: "https://cdn.dynastyurbanstyle.com/media".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_memory_backend_needs_no_directory() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            base_path: String::new(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }
}
