//! Configuration management for confsync.
//!
//! Parses `confsync.toml` configuration files with serde and provides
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
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.api_token`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "confsync.toml";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override Confluence username.
    pub username: Option<String>,
    /// Override Confluence API token.
    pub api_token: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection configuration.
    pub confluence: Option<ConfluenceConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence connection configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence server base URL.
    pub base_url: String,
    /// Account username (or e-mail for cloud instances).
    pub username: String,
    /// API token used as the Basic auth password.
    pub api_token: String,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has
    /// invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.username, "confluence.username")?;
        require_non_empty(&self.api_token, "confluence.api_token")?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "confluence.timeout_secs cannot be 0".to_owned(),
            ));
        }

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
        /// Config field path (e.g., "`confluence.api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
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
    /// Otherwise, searches for `confsync.toml` in the current directory
    /// and parents, falling back to an empty config.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing
    /// fails.
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
    /// Returns the Confluence config if the `[confluence]` section is
    /// present and all fields are valid. Use this instead of accessing
    /// the `confluence` field directly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or
    /// invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if settings.base_url.is_none()
            && settings.username.is_none()
            && settings.api_token.is_none()
        {
            return;
        }

        let confluence = self.confluence.get_or_insert_with(|| ConfluenceConfig {
            base_url: String::new(),
            username: String::new(),
            api_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        });

        if let Some(base_url) = &settings.base_url {
            confluence.base_url.clone_from(base_url);
        }
        if let Some(username) = &settings.username {
            confluence.username.clone_from(username);
        }
        if let Some(api_token) = &settings.api_token {
            confluence.api_token.clone_from(api_token);
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.api_token =
                expand::expand_env(&confluence.api_token, "confluence.api_token")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Create a valid Confluence config for testing.
    fn valid_confluence_config() -> ConfluenceConfig {
        ConfluenceConfig {
            base_url: "https://confluence.example.com".to_owned(),
            username: "bot@example.com".to_owned(),
            api_token: "token".to_owned(),
            timeout_secs: 30,
        }
    }

    fn assert_validation_error(config: &ConfluenceConfig, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.confluence.is_none());
    }

    #[test]
    fn test_parse_confluence_config() {
        let toml = r#"
[confluence]
base_url = "https://confluence.example.com"
username = "bot@example.com"
api_token = "token123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://confluence.example.com");
        assert_eq!(confluence.username, "bot@example.com");
        assert_eq!(confluence.api_token, "token123");
        assert_eq!(confluence.timeout_secs, 30);
    }

    #[test]
    fn test_parse_timeout_override() {
        let toml = r#"
[confluence]
base_url = "https://confluence.example.com"
username = "bot"
api_token = "token"
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.confluence.unwrap().timeout_secs, 5);
    }

    #[test]
    fn test_validate_valid() {
        assert!(valid_confluence_config().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_token() {
        let config = ConfluenceConfig {
            api_token: String::new(),
            ..valid_confluence_config()
        };
        assert_validation_error(&config, &["api_token", "empty"]);
    }

    #[test]
    fn test_validate_invalid_url_scheme() {
        let config = ConfluenceConfig {
            base_url: "ftp://confluence.example.com".to_owned(),
            ..valid_confluence_config()
        };
        assert_validation_error(&config, &["base_url", "http"]);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = ConfluenceConfig {
            timeout_secs: 0,
            ..valid_confluence_config()
        };
        assert_validation_error(&config, &["timeout_secs"]);
    }

    #[test]
    fn test_require_confluence_missing_section() {
        let config = Config::default();
        let err = config.require_confluence().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[confluence]"));
    }

    #[test]
    fn test_require_confluence_returns_validated() {
        let config = Config {
            confluence: Some(valid_confluence_config()),
            config_path: None,
        };
        assert!(config.require_confluence().is_ok());
    }

    #[test]
    fn test_apply_cli_settings_overrides() {
        let mut config = Config {
            confluence: Some(valid_confluence_config()),
            config_path: None,
        };
        let overrides = CliSettings {
            base_url: Some("https://other.example.com".to_owned()),
            api_token: Some("fresh-token".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://other.example.com");
        assert_eq!(confluence.api_token, "fresh-token");
        assert_eq!(confluence.username, "bot@example.com"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_creates_section() {
        let mut config = Config::default();
        let overrides = CliSettings {
            base_url: Some("https://confluence.example.com".to_owned()),
            username: Some("bot".to_owned()),
            api_token: Some("token".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert!(config.require_confluence().is_ok());
    }

    #[test]
    fn test_apply_cli_settings_empty_keeps_config_absent() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert!(config.confluence.is_none());
    }

    #[test]
    fn test_expand_env_vars_confluence() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CONFSYNC_TEST_URL", "https://confluence.test.com");
            std::env::set_var("CONFSYNC_TEST_TOKEN", "my-token");
        }

        let toml = r#"
[confluence]
base_url = "${CONFSYNC_TEST_URL}"
username = "${CONFSYNC_TEST_USER:-bot}"
api_token = "${CONFSYNC_TEST_TOKEN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://confluence.test.com");
        assert_eq!(confluence.username, "bot");
        assert_eq!(confluence.api_token, "my-token");

        unsafe {
            std::env::remove_var("CONFSYNC_TEST_URL");
            std::env::remove_var("CONFSYNC_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CONFSYNC_MISSING_VAR_TEST");
        }

        let toml = r#"
[confluence]
base_url = "${CONFSYNC_MISSING_VAR_TEST}"
username = "bot"
api_token = "token"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CONFSYNC_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("confluence.base_url"));
    }

    #[test]
    fn test_expand_env_vars_literal_unchanged() {
        let toml = r#"
[confluence]
base_url = "https://confluence.example.com"
username = "bot"
api_token = "token"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.confluence.unwrap().base_url,
            "https://confluence.example.com"
        );
    }
}
