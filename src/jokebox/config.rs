use crate::error::{JokeboxError, Result};
use crate::fetcher::remote::{DEFAULT_BASE_URL, DEFAULT_BLACKLIST_FLAGS, DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const DEFAULT_FAVORITES_LIMIT: usize = 50;

/// Configuration for jokebox, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JokeboxConfig {
    /// Base URL of the joke API, without the category segment
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Content flags the API should never return
    #[serde(default = "default_blacklist_flags")]
    pub blacklist_flags: Vec<String>,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_favorites_limit")]
    pub favorites_limit: usize,

    /// Category used when none is given (`any` for no filter)
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Only serve bundled jokes
    #[serde(default)]
    pub offline: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_blacklist_flags() -> Vec<String> {
    DEFAULT_BLACKLIST_FLAGS.iter().map(|f| f.to_string()).collect()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_favorites_limit() -> usize {
    DEFAULT_FAVORITES_LIMIT
}

fn default_category() -> String {
    "any".to_string()
}

impl Default for JokeboxConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            blacklist_flags: default_blacklist_flags(),
            history_limit: default_history_limit(),
            favorites_limit: default_favorites_limit(),
            default_category: default_category(),
            offline: false,
        }
    }
}

impl JokeboxConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JokeboxError::Io)?;
        let config: JokeboxConfig =
            serde_json::from_str(&content).map_err(JokeboxError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JokeboxError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JokeboxError::Serialization)?;
        fs::write(config_path, content).map_err(JokeboxError::Io)?;
        Ok(())
    }

    /// Set a value by its command-line key name.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "category" => self.default_category = value.trim().to_lowercase(),
            "offline" => {
                self.offline = value
                    .parse()
                    .map_err(|_| JokeboxError::Api(format!("Expected true or false, got {}", value)))?
            }
            "api-url" => self.api_base_url = value.trim_end_matches('/').to_string(),
            "timeout-ms" => {
                self.timeout_ms = value
                    .parse()
                    .map_err(|_| JokeboxError::Api(format!("Expected milliseconds, got {}", value)))?
            }
            other => return Err(JokeboxError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Read a value by its command-line key name.
    pub fn get_key(&self, key: &str) -> Result<String> {
        match key {
            "category" => Ok(self.default_category.clone()),
            "offline" => Ok(self.offline.to_string()),
            "api-url" => Ok(self.api_base_url.clone()),
            "timeout-ms" => Ok(self.timeout_ms.to_string()),
            other => Err(JokeboxError::Api(format!("Unknown config key: {}", other))),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["category", "offline", "api-url", "timeout-ms"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = JokeboxConfig::default();
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.favorites_limit, 50);
        assert_eq!(config.default_category, "any");
        assert!(config.blacklist_flags.contains(&"nsfw".to_string()));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = JokeboxConfig::load(dir.path().join("missing")).unwrap();
        assert_eq!(config, JokeboxConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();

        let mut config = JokeboxConfig::default();
        config.set_key("category", "Programming").unwrap();
        config.set_key("offline", "true").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = JokeboxConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_category, "programming");
        assert!(loaded.offline);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"timeout_ms": 1500}"#).unwrap();

        let loaded = JokeboxConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.timeout_ms, 1500);
        assert_eq!(loaded.history_limit, 20);
    }

    #[test]
    fn test_set_key_rejects_bad_values() {
        let mut config = JokeboxConfig::default();
        assert!(config.set_key("offline", "maybe").is_err());
        assert!(config.set_key("timeout-ms", "soon").is_err());
        assert!(config.set_key("colour", "red").is_err());
        assert!(config.get_key("colour").is_err());
    }
}
