//! Runtime configuration for hosts of the directory core.
//!
//! # Responsibility
//! - Resolve which directory source to open and how to log.
//! - Read the `SKILLMAP_*` environment variables.
//!
//! # Invariants
//! - Blank values count as unset.
//! - Exactly one source must be configured; both at once is rejected.

use crate::logging::{default_log_level, init_logging, normalize_level};
use crate::source::snapshot::SnapshotDirectorySource;
use crate::source::sqlite_source::SqliteDirectorySource;
use crate::source::{DirectorySource, SourceError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "SKILLMAP_DB_PATH";
pub const SNAPSHOT_PATH_ENV: &str = "SKILLMAP_SNAPSHOT_PATH";
pub const LOG_LEVEL_ENV: &str = "SKILLMAP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SKILLMAP_LOG_DIR";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Boxed source handed to `DirectoryService` by configured hosts.
pub type BoxedDirectorySource = Box<dyn DirectorySource + Send + Sync>;

#[derive(Debug)]
pub enum ConfigError {
    /// Both a database and a snapshot path were given.
    AmbiguousSource { db: PathBuf, snapshot: PathBuf },
    MissingSource,
    InvalidLogLevel(String),
    Logging(String),
    Source(SourceError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmbiguousSource { db, snapshot } => write!(
                f,
                "both database `{}` and snapshot `{}` configured; choose one",
                db.display(),
                snapshot.display()
            ),
            Self::MissingSource => write!(
                f,
                "no directory source configured; set {DB_PATH_ENV} or {SNAPSHOT_PATH_ENV}"
            ),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SourceError> for ConfigError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Backing store of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Sqlite(PathBuf),
    Snapshot(PathBuf),
}

impl SourceConfig {
    /// Picks the single configured source, if any.
    ///
    /// # Errors
    /// - Returns `AmbiguousSource` when both paths are present.
    pub fn resolve(db: Option<PathBuf>, snapshot: Option<PathBuf>) -> ConfigResult<Option<Self>> {
        match (non_blank_path(db), non_blank_path(snapshot)) {
            (Some(db), Some(snapshot)) => Err(ConfigError::AmbiguousSource { db, snapshot }),
            (Some(db), None) => Ok(Some(Self::Sqlite(db))),
            (None, Some(snapshot)) => Ok(Some(Self::Snapshot(snapshot))),
            (None, None) => Ok(None),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Sqlite(path) | Self::Snapshot(path) => path,
        }
    }

    /// Opens the configured source; SQLite databases are migrated first.
    pub fn open(&self) -> ConfigResult<BoxedDirectorySource> {
        let source: BoxedDirectorySource = match self {
            Self::Sqlite(path) => Box::new(SqliteDirectorySource::try_new(path.clone())?),
            Self::Snapshot(path) => Box::new(SnapshotDirectorySource::open(path.clone())?),
        };
        Ok(source)
    }
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub source: Option<SourceConfig>,
    pub log_level: &'static str,
    /// File logging stays off without a directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            source: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl DirectoryConfig {
    /// Reads the `SKILLMAP_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let source = SourceConfig::resolve(
            read(DB_PATH_ENV).map(PathBuf::from),
            read(SNAPSHOT_PATH_ENV).map(PathBuf::from),
        )?;
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            source,
            log_level,
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        })
    }

    /// Replaces the log level; `None` keeps the current one.
    pub fn with_log_level(mut self, level: Option<&str>) -> ConfigResult<Self> {
        if let Some(level) = level {
            self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        }
        Ok(self)
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging is active afterwards.
    pub fn init_logging(&self) -> ConfigResult<bool> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir.to_str().ok_or_else(|| {
            ConfigError::Logging(format!(
                "log_dir `{}` is not valid UTF-8",
                log_dir.display()
            ))
        })?;
        init_logging(self.log_level, log_dir).map_err(ConfigError::Logging)?;
        Ok(true)
    }

    /// Opens the configured directory source.
    ///
    /// # Errors
    /// - Returns `MissingSource` when no source is configured.
    /// - Returns `Source` when the database or snapshot cannot be opened.
    pub fn open_source(&self) -> ConfigResult<BoxedDirectorySource> {
        self.source.as_ref().ok_or(ConfigError::MissingSource)?.open()
    }
}

fn non_blank_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty())
}
