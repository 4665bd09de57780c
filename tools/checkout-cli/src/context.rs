//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use checkout_cache::{Cache, FileStore, MemoryStore, Store};
use checkout_commerce::cart::CartStore;
use checkout_commerce::catalog::Catalog;
use checkout_commerce::Currency;
use chrono::NaiveDate;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Cart store with the backend chosen at start-up.
pub type Cart = CartStore<Box<dyn Store>>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Product and delivery-option tables.
    pub catalog: Catalog,
    /// Currency for labels.
    pub currency: Currency,
    /// Keep the cart in memory only.
    pub ephemeral: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output, ephemeral: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(resolve(&cwd, path))
                .with_context(|| format!("Failed to load catalog: {}", path))?,
            None => Catalog::builtin().context("Built-in catalog is invalid")?,
        };
        let currency = config.display.currency()?;

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog,
            currency,
            ephemeral,
        })
    }

    /// Directory the cart is persisted in.
    pub fn data_dir(&self) -> PathBuf {
        resolve(&self.cwd, &self.config.storage.data_dir)
    }

    /// Open the cart store and attach the badge subscriber.
    pub fn open_cart(&self) -> Result<Cart> {
        let store: Box<dyn Store> = if self.ephemeral {
            Box::new(MemoryStore::new())
        } else {
            let dir = self.data_dir();
            Box::new(
                FileStore::open(&dir)
                    .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?,
            )
        };

        let mut cart = CartStore::load(Cache::new(store), self.config.storage.key.clone())
            .context("Failed to load cart")?;
        self.output.debug(&format!(
            "Loaded {} cart entries from '{}'",
            cart.len(),
            cart.key()
        ));

        let output = self.output.clone();
        cart.subscribe(move |event, items| {
            tracing::info!(?event, entries = items.len(), "cart updated");
            output.badge(checkout_commerce::cart::total_quantity(items));
        });
        Ok(cart)
    }

    /// The day delivery dates are counted from.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
