use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from lanes.toml. Every section and field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_items_per_column")]
    pub items_per_column: usize,
    /// Load the board from this JSON file instead of generating one
    #[serde(default)]
    pub board: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            columns: default_columns(),
            items_per_column: default_items_per_column(),
            board: None,
        }
    }
}

fn default_columns() -> usize {
    1000
}

fn default_items_per_column() -> usize {
    4
}

/// Row geometry, in terminal cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width of one column, the row extent of the board window
    #[serde(default = "default_column_width")]
    pub column_width: usize,
    /// Height of one item card, the row extent of every item window
    #[serde(default = "default_item_height")]
    pub item_height: usize,
    /// Rows materialized beyond each edge of a viewport
    #[serde(default = "default_overscan")]
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            column_width: default_column_width(),
            item_height: default_item_height(),
            overscan: default_overscan(),
        }
    }
}

fn default_column_width() -> usize {
    28
}

fn default_item_height() -> usize {
    3
}

fn default_overscan() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme overrides, `name = "#RRGGBB"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Without a file nothing is logged; the terminal belongs to the UI.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
