//! Discovery of the nginx virtual-host file serving an installation.
//!
//! Candidate directories are scanned in order for files that mention the
//! root path on any line. When exactly one file matches, its `access_log`
//! and `error_log` directives are read to find the host's log files.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::settings::NginxSettings;

/// Prefix of the display value for an ambiguous selection.
pub const AMBIGUOUS_PREFIX: &str = "Multiple nginx config files for this host: ";

const ACCESS_LOG_DIRECTIVE: &str = "access_log";
const ERROR_LOG_DIRECTIVE: &str = "error_log";

/// Files matched by a scan, plus the failures met along the way.
#[derive(Debug, Default)]
pub struct MatchScan {
    pub matches: Vec<PathBuf>,
    pub errors: Vec<Error>,
}

/// Outcome of choosing a config file from the matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    None,
    Single(PathBuf),
    Ambiguous(Vec<PathBuf>),
}

impl Selection {
    pub fn single(&self) -> Option<&Path> {
        match self {
            Selection::Single(path) => Some(path),
            _ => None,
        }
    }

    /// Converts a non-single outcome into its error kind.
    pub fn into_result(self, root: &str) -> Result<PathBuf> {
        match self {
            Selection::Single(path) => Ok(path),
            Selection::None => Err(Error::NoMatchFound {
                root: root.to_string(),
            }),
            Selection::Ambiguous(paths) => Err(Error::AmbiguousMatch { paths }),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::None => write!(f, "Not found"),
            Selection::Single(path) => write!(f, "{}", path.display()),
            Selection::Ambiguous(paths) => {
                let joined = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "{}{}", AMBIGUOUS_PREFIX, joined)
            }
        }
    }
}

/// Log files declared by a virtual-host config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPaths {
    pub access_log: Option<String>,
    pub error_log: Option<String>,
}

impl fmt::Display for LogPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error Log: {} Access Log: {}",
            self.error_log.as_deref().unwrap_or_default(),
            self.access_log.as_deref().unwrap_or_default()
        )
    }
}

/// Full result of a lookup for one root path.
#[derive(Debug)]
pub struct Location {
    pub selection: Selection,
    /// Present only when a single file was selected and could be read.
    pub logs: Option<LogPaths>,
    pub errors: Vec<Error>,
}

/// Locates the virtual-host config for a root path.
pub struct ConfigFileLocator {
    candidate_dirs: Vec<PathBuf>,
    log_pattern: Regex,
}

impl ConfigFileLocator {
    pub fn new(settings: &NginxSettings) -> Result<Self> {
        let dirs = settings
            .candidate_dirs()
            .iter()
            .map(|dir| dir.to_path_buf())
            .collect();
        Self::with_dirs(dirs, &settings.log_dir)
    }

    /// Builds a locator over explicit directories, scanned in the given order.
    pub fn with_dirs(candidate_dirs: Vec<PathBuf>, log_dir: &str) -> Result<Self> {
        let log_dir = if log_dir.ends_with('/') {
            log_dir.to_string()
        } else {
            format!("{}/", log_dir)
        };
        let log_pattern = Regex::new(&format!("{}[A-Za-z0-9._-]+", regex::escape(&log_dir)))?;
        Ok(Self {
            candidate_dirs,
            log_pattern,
        })
    }

    pub fn candidate_dirs(&self) -> &[PathBuf] {
        &self.candidate_dirs
    }

    /// Lists every entry of `dir`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryUnreadable` if the directory cannot be listed.
    pub fn list_candidate_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let unreadable = |source| Error::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            files.push(dir.join(entry.file_name()));
        }
        files.sort();
        Ok(files)
    }

    /// Returns files in the candidate directories that mention `root` on any line.
    ///
    /// An unreadable directory or file is recorded in `errors` and skipped.
    /// Matches are not deduplicated across directories.
    pub fn find_matching_config_files(&self, root: &str) -> MatchScan {
        let mut scan = MatchScan::default();
        if root.is_empty() {
            warn!("Empty root path, skipping config file scan");
            return scan;
        }

        for dir in &self.candidate_dirs {
            let files = match Self::list_candidate_files(dir) {
                Ok(files) => files,
                Err(e) => {
                    debug!("{}", e);
                    scan.errors.push(e);
                    continue;
                }
            };
            debug!("Scanning {} files in {}", files.len(), dir.display());

            for file in files {
                match read_lossy(&file) {
                    Ok(content) => {
                        if content.lines().any(|line| line.contains(root)) {
                            debug!("{} references {}", file.display(), root);
                            scan.matches.push(file);
                        }
                    }
                    Err(e) => {
                        debug!("{}", e);
                        scan.errors.push(e);
                    }
                }
            }
        }

        scan
    }

    /// Chooses the config file among `matches`.
    pub fn select_config_file(matches: Vec<PathBuf>) -> Selection {
        match matches.len() {
            0 => Selection::None,
            1 => Selection::Single(matches.into_iter().next().unwrap_or_default()),
            _ => Selection::Ambiguous(matches),
        }
    }

    /// Reads `config_file` and extracts its log paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigFileUnreadable` if the file cannot be read.
    pub fn extract_log_paths(&self, config_file: &Path) -> Result<LogPaths> {
        let content = read_lossy(config_file)?;
        Ok(self.extract_log_paths_from_str(&content))
    }

    /// Extracts log paths from config text. The last matching line wins.
    pub fn extract_log_paths_from_str(&self, content: &str) -> LogPaths {
        let mut logs = LogPaths::default();

        for line in content.lines() {
            if line.contains(ACCESS_LOG_DIRECTIVE) {
                if let Some(m) = self.log_pattern.find(line) {
                    logs.access_log = Some(m.as_str().to_string());
                }
            }
            if line.contains(ERROR_LOG_DIRECTIVE) {
                if let Some(m) = self.log_pattern.find(line) {
                    logs.error_log = Some(m.as_str().to_string());
                }
            }
        }

        logs
    }

    /// Runs scan, selection and extraction for `root`.
    pub fn locate(&self, root: &str) -> Location {
        let MatchScan {
            matches,
            mut errors,
        } = self.find_matching_config_files(root);
        let selection = Self::select_config_file(matches);

        let logs = match selection.single() {
            Some(path) => match self.extract_log_paths(path) {
                Ok(logs) => Some(logs),
                Err(e) => {
                    debug!("{}", e);
                    errors.push(e);
                    None
                }
            },
            None => None,
        };

        Location {
            selection,
            logs,
            errors,
        }
    }
}

fn read_lossy(path: &Path) -> Result<String> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| Error::ConfigFileUnreadable {
            path: path.to_path_buf(),
            source,
        })
}
