//! Store listing.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::env_data::CONFIG_FILE;
use crate::error::Result;
use crate::php_array;

/// Source of store display names.
pub trait StoreProvider {
    fn store_names(&self) -> Result<Vec<String>>;
}

/// Store names given directly in settings.
pub struct ConfiguredStores {
    names: Vec<String>,
}

impl ConfiguredStores {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl StoreProvider for ConfiguredStores {
    fn store_names(&self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }
}

/// Store names from the `scopes.stores` section of `app/etc/config.php`.
///
/// The section only exists after scopes have been dumped to the file; a
/// missing file or section yields no stores.
pub struct ScopeStores {
    config_file: PathBuf,
}

impl ScopeStores {
    pub fn new(root: &Path) -> Self {
        Self {
            config_file: root.join(CONFIG_FILE),
        }
    }
}

impl StoreProvider for ScopeStores {
    fn store_names(&self) -> Result<Vec<String>> {
        if !self.config_file.is_file() {
            debug!("No scope config at {}", self.config_file.display());
            return Ok(Vec::new());
        }

        let config = php_array::parse_file(&self.config_file)?;
        let names = match config.pointer("/scopes/stores") {
            Some(Value::Object(stores)) => stores
                .values()
                .filter_map(|store| store.get("name").and_then(Value::as_str))
                .map(|name| name.to_string())
                .collect(),
            _ => Vec::new(),
        };

        Ok(names)
    }
}

/// Joins store names for display.
pub fn render_store_names(names: &[String]) -> String {
    names.join(", ")
}
