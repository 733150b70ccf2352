//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dsviz/dsviz.toml`
//! 3. Local config: `<dir>/.dsviz.toml`
//! 4. Environment variables: `DSVIZ_*` prefix

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::tree::{self, seed_forest};
use crate::domain::{EdgePolicy, Forest, Spacing, DEFAULT_CAPACITY};

/// Initial contents of each structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Seeds {
    pub array: Vec<i64>,
    pub list: Vec<i64>,
    pub stack: Vec<i64>,
    pub queue: Vec<i64>,
    pub playlist: Vec<String>,
    pub forest: Forest,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            array: vec![1, 2, 3],
            list: vec![1, 2, 3],
            stack: vec![1, 2, 3],
            queue: vec![10, 20, 30],
            playlist: vec![
                "Shape of You".into(),
                "Blinding Lights".into(),
                "Dance Monkey".into(),
            ],
            forest: seed_forest(),
        }
    }
}

/// Raw seeds for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSeeds {
    pub array: Option<Vec<i64>>,
    pub list: Option<Vec<i64>>,
    pub stack: Option<Vec<i64>>,
    pub queue: Option<Vec<i64>>,
    pub playlist: Option<Vec<String>>,
    pub forest: Option<Forest>,
}

impl Seeds {
    /// Overlay replaces whole lists; there is no element-wise merge.
    fn merge(&self, overlay: &RawSeeds) -> Self {
        Self {
            array: overlay.array.clone().unwrap_or_else(|| self.array.clone()),
            list: overlay.list.clone().unwrap_or_else(|| self.list.clone()),
            stack: overlay.stack.clone().unwrap_or_else(|| self.stack.clone()),
            queue: overlay.queue.clone().unwrap_or_else(|| self.queue.clone()),
            playlist: overlay
                .playlist
                .clone()
                .unwrap_or_else(|| self.playlist.clone()),
            forest: overlay.forest.clone().unwrap_or_else(|| self.forest.clone()),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub capacity: Option<usize>,
    pub edge_policy: Option<EdgePolicy>,
    pub advance_delay_ms: Option<u64>,
    pub layout: Option<Spacing>,
    pub seeds: RawSeeds,
}

/// Unified configuration for dsviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Maximum length of the stack and queue (default: 5)
    pub capacity: usize,
    /// Edge insertion policy for graphs (default: strict)
    pub edge_policy: EdgePolicy,
    /// Delay before the play queue advances, in milliseconds (default: 3000)
    pub advance_delay_ms: u64,
    /// Tree layout spacing
    pub layout: Spacing,
    /// Initial structure contents
    pub seeds: Seeds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            edge_policy: EdgePolicy::Strict,
            advance_delay_ms: 3000,
            layout: Spacing::default(),
            seeds: Seeds::default(),
        }
    }
}

/// Get the XDG config directory for dsviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dsviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dsviz.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".dsviz.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            capacity: overlay.capacity.unwrap_or(self.capacity),
            edge_policy: overlay.edge_policy.unwrap_or(self.edge_policy),
            advance_delay_ms: overlay.advance_delay_ms.unwrap_or(self.advance_delay_ms),
            layout: overlay.layout.unwrap_or(self.layout),
            seeds: self.seeds.merge(&overlay.seeds),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.dsviz.toml`
    pub fn load(local_dir: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "loading local config");
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply DSVIZ_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__` (`DSVIZ_LAYOUT__X`); list seeds are comma
    /// separated (`DSVIZ_SEEDS__QUEUE=1,2`). A value that does not parse is a
    /// config error rather than being skipped.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DSVIZ")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("seeds.array")
                    .with_list_parse_key("seeds.list")
                    .with_list_parse_key("seeds.stack")
                    .with_list_parse_key("seeds.queue")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "capacity")? {
            settings.capacity = val;
        }
        if let Some(val) = env_value(&config, "edge_policy")? {
            settings.edge_policy = val;
        }
        if let Some(val) = env_value(&config, "advance_delay_ms")? {
            settings.advance_delay_ms = val;
        }
        if let Some(val) = env_value(&config, "layout.x")? {
            settings.layout.x = val;
        }
        if let Some(val) = env_value(&config, "layout.y")? {
            settings.layout.y = val;
        }
        let seeds = &mut settings.seeds;
        for (key, target) in [
            ("seeds.array", &mut seeds.array),
            ("seeds.list", &mut seeds.list),
            ("seeds.stack", &mut seeds.stack),
            ("seeds.queue", &mut seeds.queue),
        ] {
            if let Some(val) = env_list(&config, key)? {
                debug!(key, ?val, "seed overridden from environment");
                *target = val;
            }
        }

        Ok(settings)
    }

    /// Reject settings no structure could be built from.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.capacity == 0 {
            return Err(ApplicationError::config("capacity must be at least 1"));
        }
        if !(self.layout.x > 0.0 && self.layout.y > 0.0) {
            return Err(ApplicationError::config(format!(
                "layout spacing must be positive, got {}x{}",
                self.layout.x, self.layout.y
            )));
        }
        if let Some(id) = tree::duplicate_id(&self.seeds.forest) {
            return Err(ApplicationError::config(format!(
                "duplicate tree id {} in seeds.forest",
                id
            )));
        }
        for (name, seed) in [("stack", &self.seeds.stack), ("queue", &self.seeds.queue)] {
            if seed.len() > self.capacity {
                return Err(ApplicationError::config(format!(
                    "{} seed has {} elements but capacity is {}",
                    name,
                    seed.len(),
                    self.capacity
                )));
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dsviz configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dsviz/dsviz.toml
#   Local:  <dir>/.dsviz.toml
#   Env:    DSVIZ_* environment variables (e.g. DSVIZ_CAPACITY=8)

# Maximum length of stack and queue
# capacity = 5

# Graph edge policy: "strict" rejects dangling and duplicate edges,
# "permissive" accepts anything
# edge_policy = "strict"

# Play queue auto-advance delay
# advance_delay_ms = 3000

[layout]
# x = 200.0
# y = 100.0

[seeds]
# array = [1, 2, 3]
# list = [1, 2, 3]
# stack = [1, 2, 3]
# queue = [10, 20, 30]
# playlist = ["Shape of You", "Blinding Lights"]

# [[seeds.forest]]
# id = 1
# label = "Root"
"#
        .to_string()
    }
}

/// `None` when the variable is not set.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> ApplicationResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

/// A single number parses as a scalar, so accept it as a one-element list.
fn env_list(config: &Config, key: &str) -> ApplicationResult<Option<Vec<i64>>> {
    match env_value::<Vec<i64>>(config, key) {
        Ok(val) => Ok(val),
        Err(_) => env_value::<i64>(config, key).map(|one| one.map(|v| vec![v])),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_validated_then_ok() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn given_zero_capacity_when_validated_then_config_error() {
        let settings = Settings {
            capacity: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_partial_overlay_when_merged_then_keeps_unspecified_values() {
        let raw: RawSettings = toml::from_str("capacity = 8\n[seeds]\nqueue = [1]\n").unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.capacity, 8);
        assert_eq!(merged.seeds.queue, vec![1]);
        assert_eq!(merged.seeds.stack, vec![1, 2, 3]);
        assert_eq!(merged.edge_policy, EdgePolicy::Strict);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: Result<RawSettings, _> = toml::from_str(&Settings::template());
        assert!(raw.is_ok());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let text = Settings::default().to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, Settings::default());
    }
}
