//! TOML settings for a diagnostic run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SETTINGS_FILE_NAME: &str = ".envinfo.toml";

pub const DEFAULT_VHOST_DIR: &str = "/var/www/vhost/";
pub const DEFAULT_SITES_ENABLED_DIR: &str = "/etc/nginx/sites-enabled/";
pub const DEFAULT_LOG_DIR: &str = "/var/log/nginx/";

/// Settings as defined in `.envinfo.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub nginx: NginxSettings,
    #[serde(default)]
    pub php: PhpSettings,
    #[serde(default)]
    pub site: SiteSettings,
    /// Path of the file these settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Web-server directories scanned for virtual-host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NginxSettings {
    #[serde(default = "default_vhost_dir")]
    pub vhost_dir: PathBuf,
    #[serde(default = "default_sites_enabled_dir")]
    pub sites_enabled_dir: PathBuf,
    /// Directory that `access_log` and `error_log` paths are expected under.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhpSettings {
    #[serde(default = "default_php_binary")]
    pub binary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    pub base_url: Option<String>,
    pub stores: Option<Vec<String>>,
}

fn default_vhost_dir() -> PathBuf {
    PathBuf::from(DEFAULT_VHOST_DIR)
}

fn default_sites_enabled_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SITES_ENABLED_DIR)
}

fn default_log_dir() -> String {
    DEFAULT_LOG_DIR.to_string()
}

fn default_php_binary() -> String {
    "php".to_string()
}

impl Default for NginxSettings {
    fn default() -> Self {
        Self {
            vhost_dir: default_vhost_dir(),
            sites_enabled_dir: default_sites_enabled_dir(),
            log_dir: default_log_dir(),
        }
    }
}

impl NginxSettings {
    /// Candidate directories in scan order.
    pub fn candidate_dirs(&self) -> [&Path; 2] {
        [self.vhost_dir.as_path(), self.sites_enabled_dir.as_path()]
    }
}

impl Default for PhpSettings {
    fn default() -> Self {
        Self {
            binary: default_php_binary(),
        }
    }
}

impl Settings {
    /// Parses settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| Error::SettingsUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let mut settings: Settings = toml::from_str(&content).map_err(|error| Error::Toml {
            error,
            context: path.display().to_string(),
        })?;
        settings.source = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Resolves settings for a root path.
    ///
    /// An explicit path wins. Otherwise `.envinfo.toml` is searched from
    /// `root` upward, stopping at a repository boundary, then in the user
    /// config directory. Falls back to defaults when nothing is found.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = Self::find_upward(root) {
            return Self::from_file(&path);
        }

        if let Some(path) = dirs::config_dir().map(|d| d.join("envinfo").join("config.toml")) {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn find_upward(root: &Path) -> Option<PathBuf> {
        let mut current_dir = root;

        loop {
            let candidate = current_dir.join(SETTINGS_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }

            if current_dir.join(".git").exists() {
                break;
            }

            match current_dir.parent() {
                Some(parent) if parent != current_dir => current_dir = parent,
                _ => break,
            }
        }

        None
    }
}
