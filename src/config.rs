//! Where palettes live on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{StorageError, StorageErrorKind};

/// Default definition source directory.
pub const DEFAULT_SOURCE_DIR: &str = "palettes";

/// Default compiled index file name, inside the source directory.
pub const DEFAULT_INDEX_FILE: &str = "index.json";

/// Paths used by a [`PaletteStore`](crate::PaletteStore).
///
/// # Example
///
/// ```rust
/// use chromabook::PaletteConfig;
///
/// let config = PaletteConfig::default()
///     .with_source_dir("assets/palettes")
///     .with_log_path("build/palettes.log");
/// assert_eq!(config.index_path().to_str(), Some("assets/palettes/index.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    source_dir: PathBuf,
    index_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

impl PaletteConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            index_path: None,
            log_path: None,
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Sets an explicit index path. Without one the index is
    /// `<source_dir>/index.json`.
    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = Some(path.into());
        self
    }

    /// Enables appending compile events to a log file.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.index_path
            .clone()
            .unwrap_or_else(|| self.source_dir.join(DEFAULT_INDEX_FILE))
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Reads a YAML config file. Every key is optional:
    ///
    /// ```yaml
    /// source_dir: assets/palettes
    /// index_path: build/palettes.json
    /// log_path: build/palettes.log
    /// ```
    ///
    /// Relative paths are kept as written.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StorageError::from_read(path, e))?;
        Self::from_yaml_str(&content)
            .map_err(|e| StorageError::new(path, StorageErrorKind::Corrupt, e.to_string()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(Self {
            source_dir: file
                .source_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR)),
            index_path: file.index_path,
            log_path: file.log_path,
        })
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_DIR)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source_dir: Option<PathBuf>,
    index_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}
