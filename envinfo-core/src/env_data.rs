//! Read-only environment configuration of an installation.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::php_array;

/// Location of the deployment configuration relative to the root path.
pub const ENV_FILE: &str = "app/etc/env.php";
/// Location of the shared configuration relative to the root path.
pub const CONFIG_FILE: &str = "app/etc/config.php";

pub const FRONT_NAME_KEY: &str = "backend.frontName";
pub const DB_NAME_KEY: &str = "db.connection.default.dbname";
pub const DB_USER_KEY: &str = "db.connection.default.username";
pub const DB_PASSWORD_KEY: &str = "db.connection.default.password";
pub const MAGE_MODE_KEY: &str = "MAGE_MODE";
pub const BASE_URL_KEY: &str = "system.default.web.unsecure.base_link_url";
pub const CACHE_TYPES_KEY: &str = "cache_types";

/// Environment configuration, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct EnvData {
    values: Value,
    source: Option<PathBuf>,
}

impl EnvData {
    pub fn new(values: Value) -> Self {
        Self {
            values,
            source: None,
        }
    }

    /// Loads `app/etc/env.php` below `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(ENV_FILE);
        if !path.is_file() {
            return Err(Error::EnvFileNotFound(path));
        }
        Self::from_file(&path)
    }

    /// Loads a `.php` or `.json` environment file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading environment data from {}", path.display());
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let values = if is_json {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|error| Error::Json {
                error,
                context: path.display().to_string(),
            })?
        } else {
            php_array::parse_file(path)?
        };

        Ok(Self {
            values,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Looks up a dotted key path such as `db.connection.default.dbname`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.values, |node, segment| node.get(segment))
    }

    /// Looks up a scalar and renders it as text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigKeyMissing` if the path is absent or not a scalar.
    pub fn get_str(&self, key: &str) -> Result<String> {
        self.get(key)
            .and_then(scalar_to_string)
            .ok_or_else(|| Error::ConfigKeyMissing {
                key: key.to_string(),
            })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
