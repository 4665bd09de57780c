//! CLI configuration.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use checkout_commerce::Currency;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["checkout.toml", ".checkout.toml", "checkout.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Which catalog to load.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse config text as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted values, relative to the working directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    ".checkout".to_string()
}

fn default_key() -> String {
    checkout_commerce::cart::CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. The built-in catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency code used for the symbol prefix.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::USD.code().to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl DisplayConfig {
    /// Resolve the configured currency code.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unsupported currency in config: {}", self.currency))
    }
}

/// Generate a default checkout.toml config file.
pub fn generate_default_config() -> String {
    r#"# Checkout configuration

[storage]
data_dir = ".checkout"
key = "cart"

[catalog]
# path = "catalog.json"

[display]
currency = "USD"
"#
    .to_string()
}
