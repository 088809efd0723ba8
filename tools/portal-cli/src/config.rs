//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file names, searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["portal.toml", ".portal.toml", "portal.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where carts are persisted.
    #[serde(default)]
    pub store: StoreConfig,

    /// Listing defaults.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Default session.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Directory holding one JSON file per cart, relative to the working
    /// directory unless absolute.
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

fn default_store_dir() -> String {
    ".portal/store".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Columns that sort numerically; everything else sorts as text.
    #[serde(default = "default_numeric_columns")]
    pub numeric_columns: Vec<String>,

    /// Fields the search box looks in.
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<String>,
}

fn default_page_size() -> usize {
    portal_commerce::listing::DEFAULT_PAGE_SIZE
}

fn default_numeric_columns() -> Vec<String> {
    ["price", "quantity", "totalAmount", "closingQty"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_search_fields() -> Vec<String> {
    ["itemCd", "itemNm"].into_iter().map(String::from).collect()
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            numeric_columns: default_numeric_columns(),
            search_fields: default_search_fields(),
        }
    }
}

/// Session defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Customer code to act as when `--customer` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

/// Generate a default portal.toml config file.
pub fn generate_default_config() -> String {
    r#"# Ordering portal CLI configuration

[store]
dir = ".portal/store"

[listing]
page_size = 10
numeric_columns = ["price", "quantity", "totalAmount", "closingQty"]
search_fields = ["itemCd", "itemNm"]

[session]
# customer = "C001"
"#
    .to_string()
}
