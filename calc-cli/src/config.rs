//! Configuration loading and parsing

use anyhow::{bail, Context, Result};
use calc_engine::config::{DEFAULT_CLEAR_MARKER, DEFAULT_DELETE_MARKER};
use calc_engine::CalculatorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::keys::{KeyMap, KEY_CLOSE, KEY_OPEN};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub markers: MarkersConfig,
    /// Key name → text sent to the engine, e.g. `Enter = "="`
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkersConfig {
    #[serde(default = "default_delete_marker")]
    pub delete: char,
    #[serde(default = "default_clear_marker")]
    pub clear: char,
}

fn default_delete_marker() -> char {
    DEFAULT_DELETE_MARKER
}

fn default_clear_marker() -> char {
    DEFAULT_CLEAR_MARKER
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            delete: DEFAULT_DELETE_MARKER,
            clear: DEFAULT_CLEAR_MARKER,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Print machine states and log size next to the expression
    #[serde(default)]
    pub show_state: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Engine configuration derived from the `[markers]` table
    pub fn calculator_config(&self) -> CalculatorConfig {
        CalculatorConfig::new()
            .with_delete_marker(self.markers.delete)
            .with_clear_marker(self.markers.clear)
    }

    /// Key names for the interactive mode
    ///
    /// The built-in names follow the configured markers; entries under
    /// `[keys]` are added on top and may override them.
    pub fn key_map(&self) -> KeyMap {
        let mut map = KeyMap::defaults(self.markers.delete, self.markers.clear);
        for (name, text) in &self.keys {
            map.insert(name.clone(), text.clone());
        }
        map
    }

    /// Check the configuration for values the engine or the key syntax cannot use
    pub fn validate(&self) -> Result<()> {
        self.calculator_config()
            .validate()
            .context("Invalid [markers] section")?;

        for marker in [self.markers.delete, self.markers.clear] {
            if marker == KEY_OPEN || marker == KEY_CLOSE {
                bail!("Marker {:?} is reserved for key names", marker);
            }
        }

        for name in self.keys.keys() {
            if name.is_empty() || name.contains(KEY_OPEN) || name.contains(KEY_CLOSE) {
                bail!("Invalid key name in [keys]: {:?}", name);
            }
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
