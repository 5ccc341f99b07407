mod errors;

pub use errors::{ConfigError, ConfigResult};

use crate::pager::DEFAULT_TRANSITION_DELAY;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Layout of the pagination controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// "Page 1 of 10"
    Compact,
    /// "Page 1 of 10 (1-8 of 80 items)"
    Full,
    /// "< 1 2 [3] 4 5 >"
    Numbers,
    /// "< Previous 1 2 [3] 4 5 Next >"
    Google,
}

impl std::str::FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            "numbers" => Ok(Self::Numbers),
            "google" => Ok(Self::Google),
            other => Err(format!("unknown display style: {other}")),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Number of sample items in the catalog
    pub item_count: usize,

    /// Items per page
    pub page_size: usize,

    /// Page sizes offered by the page-size selector
    pub page_size_options: Vec<usize>,

    /// Simulated loading latency between pages, in milliseconds
    pub transition_delay_ms: u64,

    /// Seed for the sample catalog; random when unset
    pub seed: Option<u64>,

    /// Show the page-size selector
    pub show_page_size_options: bool,

    /// Allow typing a page number to jump to
    pub show_page_jump: bool,

    /// Enable mouse support
    pub mouse_enabled: bool,

    /// Interval between UI ticks, in milliseconds
    pub tick_rate_ms: u64,

    /// Enable shimmer and fade animations
    pub animations: bool,

    /// Pagination controls layout
    pub display_style: DisplayStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            item_count: 50,
            page_size: 8,
            page_size_options: vec![4, 8, 12, 16, 24],
            transition_delay_ms: DEFAULT_TRANSITION_DELAY.as_millis() as u64,
            seed: None,
            show_page_size_options: true,
            show_page_jump: true,
            mouse_enabled: true,
            tick_rate_ms: 100,
            animations: true,
            display_style: DisplayStyle::Numbers,
        }
    }
}

impl Config {
    /// Initialize configuration from defaults, config file and environment.
    ///
    /// An explicit `path` must exist; otherwise the well-known locations are
    /// searched and skipped when missing.
    pub async fn init(path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Self::load_from_file().await?.unwrap_or_default(),
        };

        config.load_from_env();
        Ok(config)
    }

    /// Candidate configuration files, in priority order
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.cardpager.json"),
            PathBuf::from("./cardpager.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cardpager").join("cardpager.json"));
        }

        paths
    }

    /// Load the first configuration file found
    pub async fn load_from_file() -> Result<Option<Self>> {
        for path in Self::config_paths() {
            if path.exists() {
                return Self::load_file(&path).await.map(Some);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Load configuration from a JSON file
    pub async fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Apply `CARDPAGER_*` overrides read through `lookup`
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_var(&lookup, "CARDPAGER_ITEMS") {
            self.item_count = value;
        }

        if let Some(value) = parse_var(&lookup, "CARDPAGER_PAGE_SIZE") {
            self.page_size = value;
        }

        if let Some(value) = parse_var(&lookup, "CARDPAGER_DELAY_MS") {
            self.transition_delay_ms = value;
        }

        if let Some(value) = parse_var(&lookup, "CARDPAGER_SEED") {
            self.seed = Some(value);
        }

        if let Some(value) = parse_var(&lookup, "CARDPAGER_STYLE") {
            self.display_style = value;
        }

        if let Some(value) = lookup("CARDPAGER_ANIMATIONS") {
            self.animations = value.to_lowercase() != "false";
        }
    }

    /// Simulated latency as a duration
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Page-size choices including the configured page size, sorted and deduplicated
    pub fn effective_page_size_options(&self) -> Vec<usize> {
        let mut options = self.page_size_options.clone();
        options.push(self.page_size);
        options.retain(|size| *size > 0);
        options.sort_unstable();
        options.dedup();
        options
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        if self.page_size_options.is_empty() {
            return Err(ConfigError::NoPageSizeOptions);
        }

        if self.page_size_options.contains(&0) {
            return Err(ConfigError::ZeroPageSizeOption);
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.item_count, 50);
        assert_eq!(config.page_size, 8);
        assert_eq!(config.transition_delay(), Duration::from_millis(500));
        assert_eq!(config.display_style, DisplayStyle::Numbers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.page_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSize));

        let mut config = Config::default();
        config.page_size_options.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoPageSizeOptions));

        let mut config = Config::default();
        config.page_size_options.push(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSizeOption));

        let mut config = Config::default();
        config.tick_rate_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CARDPAGER_ITEMS", "120"),
            ("CARDPAGER_PAGE_SIZE", "12"),
            ("CARDPAGER_DELAY_MS", "not-a-number"),
            ("CARDPAGER_SEED", "9"),
            ("CARDPAGER_STYLE", "Google"),
            ("CARDPAGER_ANIMATIONS", "false"),
        ]);

        let mut config = Config::default();
        config.apply_vars(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.item_count, 120);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.transition_delay_ms, 500);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.display_style, DisplayStyle::Google);
        assert!(!config.animations);
    }

    #[test]
    fn test_effective_page_size_options() {
        let mut config = Config::default();
        config.page_size = 10;
        assert_eq!(config.effective_page_size_options(), vec![4, 8, 10, 12, 16, 24]);
    }

    #[tokio::test]
    async fn test_load_partial_file_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("cardpager.json");
        tokio::fs::write(&path, r#"{ "page_size": 12, "display_style": "full" }"#)
            .await
            .unwrap();

        let config = Config::load_file(&path).await.unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.display_style, DisplayStyle::Full);
        assert_eq!(config.item_count, 50);
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(Config::load_file(&path).await.is_err());
    }
}
