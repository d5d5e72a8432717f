//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },

    #[error("JSON parse error in {context}: {error}")]
    Json {
        error: serde_json::Error,
        context: String,
    },

    #[error("Cannot read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read config file {}: {source}", .path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read settings file {}: {source}", .path.display())]
    SettingsUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No nginx config file references {root}")]
    NoMatchFound { root: String },

    #[error("Multiple nginx config files reference this host: {}", format_paths(.paths))]
    AmbiguousMatch { paths: Vec<PathBuf> },

    #[error("Config key missing: {key}")]
    ConfigKeyMissing { key: String },

    #[error("Env file not found: {0}. Expected 'app/etc/env.php' below the root path.")]
    EnvFileNotFound(PathBuf),

    #[error("PHP parse error in {} at line {line}: {message}", .path.display())]
    PhpParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid log pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Interpreter error: {0}")]
    Interpreter(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub type Result<T> = std::result::Result<T, Error>;
