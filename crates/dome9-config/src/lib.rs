//! Provider configuration
//!
//! Credentials and endpoint come from a YAML file, overridden field by field
//! by `DOME9_*` environment variables.

pub mod error;

pub use error::*;

use dome9_sdk::HttpConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "DOME9_CONFIG_PATH";
pub const ENV_ACCESS_ID: &str = "DOME9_ACCESS_ID";
pub const ENV_SECRET_KEY: &str = "DOME9_SECRET_KEY";
pub const ENV_BASE_URL: &str = "DOME9_BASE_URL";

const LOCAL_CONFIG_FILE: &str = "dome9.yaml";
const GLOBAL_CONFIG_FILE: &str = "config.yaml";

/// Settings read from `dome9.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub access_id: Option<String>,
    pub secret_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // an empty file deserializes to null
        Ok(serde_yaml::from_str::<Option<Self>>(content)?.unwrap_or_default())
    }

    /// Environment variables win over file values
    pub fn apply_env(&mut self) {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(access_id) = var(ENV_ACCESS_ID) {
            self.access_id = Some(access_id);
        }
        if let Some(secret_key) = var(ENV_SECRET_KEY) {
            self.secret_key = Some(secret_key);
        }
        if let Some(base_url) = var(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
    }

    /// Load the first config file found, then apply the environment
    ///
    /// Running without any config file is fine as long as the environment
    /// provides the credentials.
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file()? {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn to_http_config(&self) -> Result<HttpConfig> {
        let access_id =
            non_empty(&self.access_id).ok_or(ConfigError::MissingCredential("access_id"))?;
        let secret_key =
            non_empty(&self.secret_key).ok_or(ConfigError::MissingCredential("secret_key"))?;

        let mut http = HttpConfig::new(access_id, secret_key);
        if let Some(base_url) = non_empty(&self.base_url) {
            http = http.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            http = http.with_timeout(Duration::from_secs(secs));
        }
        Ok(http)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// `~/.config/dome9`
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("dome9"))
}

/// Look for a config file
///
/// Search order:
/// 1. `DOME9_CONFIG_PATH` environment variable
/// 2. `./dome9.yaml`
/// 3. `~/.config/dome9/config.yaml`
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        tracing::warn!("{} points to missing file {}", ENV_CONFIG_PATH, path.display());
    }

    let local = std::env::current_dir()?.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    if let Ok(config_dir) = get_config_dir() {
        let global = config_dir.join(GLOBAL_CONFIG_FILE);
        if global.exists() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    const NO_ENV: [(&str, Option<&str>); 4] = [
        (ENV_CONFIG_PATH, None),
        (ENV_ACCESS_ID, None),
        (ENV_SECRET_KEY, None),
        (ENV_BASE_URL, None),
    ];

    #[test]
    fn test_parse_yaml() {
        let config = ProviderConfig::from_yaml(concat!(
            "access_id: abc\n",
            "secret_key: s3cr3t\n",
            "base_url: https://api.eu1.dome9.com/v2/\n",
            "timeout_secs: 30\n",
        ))
        .unwrap();

        assert_eq!(config.access_id.as_deref(), Some("abc"));
        assert_eq!(config.timeout_secs, Some(30));

        let http = config.to_http_config().unwrap();
        assert_eq!(http.base_url, "https://api.eu1.dome9.com/v2/");
        assert_eq!(http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(ProviderConfig::from_yaml("").unwrap(), ProviderConfig::default());
    }

    #[test]
    fn test_missing_credentials() {
        let config = ProviderConfig {
            access_id: Some("abc".into()),
            secret_key: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.to_http_config(),
            Err(ConfigError::MissingCredential("secret_key"))
        ));
    }

    #[test]
    fn test_defaults_base_url() {
        let config = ProviderConfig {
            access_id: Some("abc".into()),
            secret_key: Some("s3cr3t".into()),
            ..Default::default()
        };
        let http = config.to_http_config().unwrap();
        assert_eq!(http.base_url, dome9_sdk::http::DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        fs::write(&path, "access_id: from-file\nsecret_key: file-secret\n").unwrap();

        temp_env::with_vars(
            [
                (ENV_CONFIG_PATH, Some(path.to_str().unwrap())),
                (ENV_ACCESS_ID, Some("from-env")),
                (ENV_SECRET_KEY, None),
                (ENV_BASE_URL, None),
            ],
            || {
                let config = ProviderConfig::load().unwrap();
                assert_eq!(config.access_id.as_deref(), Some("from-env"));
                assert_eq!(config.secret_key.as_deref(), Some("file-secret"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        fs::write(temp_dir.path().join("dome9.yaml"), "access_id: local\n").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let result = temp_env::with_vars(NO_ENV, find_config_file);
        std::env::set_current_dir(original_dir).unwrap();

        assert!(result.unwrap().unwrap().ends_with("dome9.yaml"));
    }

    #[test]
    #[serial]
    fn test_env_path_takes_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        fs::write(temp_dir.path().join("dome9.yaml"), "access_id: local\n").unwrap();
        let custom = temp_dir.path().join("other.yaml");
        fs::write(&custom, "access_id: custom\n").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let result = temp_env::with_var(ENV_CONFIG_PATH, Some(custom.to_str().unwrap()), || {
            find_config_file()
        });
        std::env::set_current_dir(original_dir).unwrap();

        assert_eq!(result.unwrap(), Some(custom));
    }

    #[test]
    #[serial]
    fn test_credentials_from_env_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_vars(
            [
                (ENV_CONFIG_PATH, None),
                (ENV_ACCESS_ID, Some("env-id")),
                (ENV_SECRET_KEY, Some("env-secret")),
                (ENV_BASE_URL, Some("http://localhost:8080/v2")),
            ],
            ProviderConfig::load,
        );
        std::env::set_current_dir(original_dir).unwrap();

        let http = result.unwrap().to_http_config().unwrap();
        assert_eq!(http.access_id, "env-id");
        assert_eq!(http.base_url, "http://localhost:8080/v2");
    }

    #[test]
    fn test_unreadable_file() {
        let err = ProviderConfig::from_file(Path::new("/nonexistent/dome9.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
