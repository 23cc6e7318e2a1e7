//! TOML-based application configuration.
//!
//! Holds the knobs that are configuration rather than state: the stage
//! threshold table and the default button color. Stored at
//! `~/.config/sproutling/config.toml`, separate from the persisted state
//! blobs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, Result};
use crate::registry::DEFAULT_COLOR;
use crate::stage::DEFAULT_THRESHOLDS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Events required to advance from each stage (index 0 = stage 1 -> 2).
    /// The table length determines the number of stages.
    #[serde(default = "default_thresholds")]
    pub stage_thresholds: Vec<u32>,
    /// Color assigned to new buttons when none is given.
    #[serde(default = "default_button_color")]
    pub default_color: String,
}

fn default_thresholds() -> Vec<u32> {
    DEFAULT_THRESHOLDS.to_vec()
}

fn default_button_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage_thresholds: default_thresholds(),
            default_color: default_button_color(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, keeping the existing value's type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed as the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::Custom("config is not an object".to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| CoreError::Custom(format!("unknown config key: {key}")))?;

        let new_value = match existing {
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                serde_json::from_str(value)?
            }
            serde_json::Value::Number(_) => {
                let n: u64 = value
                    .parse()
                    .map_err(|_| CoreError::Custom(format!("cannot parse '{value}' as number")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse()
                    .map_err(|_| CoreError::Custom(format!("cannot parse '{value}' as bool")))?,
            ),
            _ => serde_json::Value::String(value.to_string()),
        };

        obj.insert(key.to_string(), new_value);
        *self = serde_json::from_value(json)?;
        Ok(())
    }
}
