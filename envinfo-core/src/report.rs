//! Environment report assembled from all data sources.

use std::path::Path;

use tracing::debug;

use crate::cache_status::{render_list, CacheStates, CacheStatusProvider};
use crate::env_data::{
    EnvData, BASE_URL_KEY, DB_NAME_KEY, DB_PASSWORD_KEY, DB_USER_KEY, FRONT_NAME_KEY,
    MAGE_MODE_KEY,
};
use crate::error::Result;
use crate::interpreter::InterpreterProbe;
use crate::locator::{ConfigFileLocator, LogPaths, Selection};
use crate::stores::{render_store_names, StoreProvider};

pub const HEADER: &str = "########    Env Info    #########";
pub const FOOTER: &str = "##################################";

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "Not available";

/// Collaborators a report is gathered from.
pub struct Sources<'a> {
    pub env: &'a EnvData,
    pub stores: &'a dyn StoreProvider,
    pub caches: &'a dyn CacheStatusProvider,
    pub interpreter: &'a dyn InterpreterProbe,
    pub locator: &'a ConfigFileLocator,
    /// Used when the environment data carries no base URL.
    pub base_url: Option<&'a str>,
}

/// One labeled value, preceded by the recoverable errors met computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub errors: Vec<String>,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            errors: Vec::new(),
        }
    }

    fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Gathered environment info, in display order.
#[derive(Debug, Clone)]
pub struct EnvReport {
    fields: Vec<Field>,
}

impl EnvReport {
    /// Gathers every field for the installation at `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigKeyMissing` when a required environment key is absent.
    /// Failures of the other sources are recorded on the affected field.
    pub fn gather(root: &Path, sources: &Sources<'_>) -> Result<Self> {
        let env = sources.env;
        let root_str = root.display().to_string();
        let mut fields = Vec::with_capacity(14);

        let site_url = env
            .get_str(BASE_URL_KEY)
            .ok()
            .or_else(|| sources.base_url.map(|s| s.to_string()))
            .unwrap_or_else(|| UNKNOWN.to_string());
        fields.push(Field::new("Site URL", site_url));
        fields.push(Field::new("Base Path", root_str.clone()));
        fields.push(Field::new("Front Name", env.get_str(FRONT_NAME_KEY)?));
        fields.push(Field::new("Database Name", env.get_str(DB_NAME_KEY)?));
        fields.push(Field::new("Database User Name", env.get_str(DB_USER_KEY)?));
        fields.push(Field::new("Database Password", env.get_str(DB_PASSWORD_KEY)?));
        fields.push(Field::new("Mage Mode", env.get_str(MAGE_MODE_KEY)?));

        fields.push(match sources.stores.store_names() {
            Ok(names) => Field::new("Current Stores", render_store_names(&names)),
            Err(e) => failed("Current Stores", UNKNOWN, e.to_string()),
        });

        let (states, cache_errors) = match sources.caches.status() {
            Ok(status) => (CacheStates::partition(&status), Vec::new()),
            Err(e) => {
                debug!("{}", e);
                (CacheStates::default(), vec![e.to_string()])
            }
        };
        fields.push(
            Field::new("Caches Enabled", render_list(&states.enabled)).with_errors(cache_errors),
        );
        fields.push(Field::new("Caches Disabled", render_list(&states.disabled)));

        fields.push(match sources.interpreter.version() {
            Ok(version) => Field::new("PHP Version", version),
            Err(e) => failed("PHP Version", UNKNOWN, e.to_string()),
        });
        fields.push(match sources.interpreter.xdebug_status() {
            Ok(status) => Field::new("Xdebug Status", status.to_string()),
            Err(e) => failed("Xdebug Status", UNKNOWN, e.to_string()),
        });

        let location = sources.locator.locate(&root_str);
        let mut scan_errors: Vec<String> = location.errors.iter().map(|e| e.to_string()).collect();
        let extraction_error = match (&location.selection, &location.logs) {
            (Selection::Single(_), None) => scan_errors.pop(),
            _ => None,
        };

        fields.push(
            Field::new("Host Nginx config File", location.selection.to_string())
                .with_errors(scan_errors),
        );
        let logs_value = match (&location.selection, location.logs) {
            (_, Some(logs)) => logs.to_string(),
            (Selection::Single(_), None) => LogPaths::default().to_string(),
            _ => NOT_AVAILABLE.to_string(),
        };
        fields.push(
            Field::new("Host Nginx Log files", logs_value)
                .with_errors(extraction_error.into_iter().collect()),
        );

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the field with `label`, if present.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// Renders the report as uncolored lines.
    pub fn render_plain(&self) -> Vec<String> {
        let mut lines = vec![String::new(), HEADER.to_string(), String::new()];
        for field in &self.fields {
            for error in &field.errors {
                lines.push(format!("Error: {}", error));
            }
            lines.push(format!("{}: {}", field.label, field.value));
        }
        lines.extend([String::new(), FOOTER.to_string(), String::new()]);
        lines
    }
}

fn failed(label: &'static str, value: &str, error: String) -> Field {
    debug!("{}: {}", label, error);
    Field::new(label, value).with_errors(vec![error])
}
