//! Configuration management for docpush.
//!
//! Parses `docpush.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.endpoint`
//! - `confluence.username`
//! - `confluence.password`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence REST API endpoint.
    pub endpoint: Option<String>,
    /// Override Confluence username.
    pub username: Option<String>,
    /// Override Confluence password or API token.
    pub password: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docpush.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence connection configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence REST API endpoint, e.g. `https://confluence.example.com/rest/api`.
    pub endpoint: String,
    /// Username for basic authentication. Blank disables authentication.
    #[serde(default)]
    pub username: String,
    /// Password or API token for basic authentication. Blank disables authentication.
    #[serde(default)]
    pub password: String,
}

impl ConfluenceConfig {
    /// Validate that required fields are properly set.
    ///
    /// Username and password may be blank (the publisher then relies on the
    /// transport's own session state), but the endpoint is mandatory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the endpoint is empty or has an
    /// invalid scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.endpoint, "confluence.endpoint")?;
        require_http_url(&self.endpoint, "confluence.endpoint")?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.password`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_PASSWORD`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docpush.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and env expansion, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Get validated Confluence configuration.
    ///
    /// Returns the Confluence config if the `[confluence]` section is present
    /// and all fields are valid. Use this instead of accessing the `confluence`
    /// field directly when the command requires Confluence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if settings.endpoint.is_none() && settings.username.is_none() && settings.password.is_none()
        {
            return;
        }

        let confluence = self.confluence.get_or_insert_with(|| ConfluenceConfig {
            endpoint: String::new(),
            username: String::new(),
            password: String::new(),
        });
        if let Some(endpoint) = &settings.endpoint {
            confluence.endpoint.clone_from(endpoint);
        }
        if let Some(username) = &settings.username {
            confluence.username.clone_from(username);
        }
        if let Some(password) = &settings.password {
            confluence.password.clone_from(password);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load and parse configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand `${VAR}` references in string configuration values.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(confluence) = &mut self.confluence {
            confluence.endpoint = expand::expand_env(&confluence.endpoint, "confluence.endpoint")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.password = expand::expand_env(&confluence.password, "confluence.password")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.confluence.is_none());
    }

    #[test]
    fn test_parse_confluence_config() {
        let toml = r#"
[confluence]
endpoint = "https://confluence.example.com/rest/api"
username = "publisher"
password = "secret123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.endpoint, "https://confluence.example.com/rest/api");
        assert_eq!(confluence.username, "publisher");
        assert_eq!(confluence.password, "secret123");
    }

    #[test]
    fn test_credentials_default_to_blank() {
        let toml = r#"
[confluence]
endpoint = "https://confluence.example.com/rest/api"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.username, "");
        assert_eq!(confluence.password, "");
        assert!(confluence.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let confluence = ConfluenceConfig {
            endpoint: String::new(),
            username: String::new(),
            password: String::new(),
        };
        assert!(matches!(
            confluence.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let confluence = ConfluenceConfig {
            endpoint: "ftp://confluence.example.com".to_owned(),
            username: String::new(),
            password: String::new(),
        };
        assert!(matches!(
            confluence.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_cli_settings_override_file_values() {
        let toml = r#"
[confluence]
endpoint = "https://old.example.com/rest/api"
username = "old-user"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.apply_cli_settings(&CliSettings {
            endpoint: Some("https://new.example.com/rest/api".to_owned()),
            username: None,
            password: Some("cli-secret".to_owned()),
        });

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.endpoint, "https://new.example.com/rest/api");
        assert_eq!(confluence.username, "old-user");
        assert_eq!(confluence.password, "cli-secret");
    }

    #[test]
    fn test_cli_settings_create_missing_section() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            endpoint: Some("https://cli.example.com/rest/api".to_owned()),
            ..CliSettings::default()
        });

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.endpoint, "https://cli.example.com/rest/api");
        assert_eq!(confluence.username, "");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/docpush.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_expands_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCPUSH_TEST_PASSWORD", "from-env");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docpush.toml");
        std::fs::write(
            &path,
            r#"
[confluence]
endpoint = "https://confluence.example.com/rest/api"
username = "publisher"
password = "${DOCPUSH_TEST_PASSWORD}"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.password, "from-env");
        unsafe {
            std::env::remove_var("DOCPUSH_TEST_PASSWORD");
        }
    }
}
