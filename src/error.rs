//! Error types for palette lookup, authoring and storage.
//!
//! Per-file compile problems are not errors: they are reported as
//! [`SkipReason`](crate::compile::SkipReason) values and compilation
//! carries on.

use std::path::PathBuf;

use crate::category::Category;

/// Top-level error for every fallible palette operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller passed something malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested palette does not exist under any category.
    #[error("palette \"{name}\" not found in any category")]
    NotFound { name: String },

    /// The index (or a definition file) could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true for [`Error::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns true for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// The category that actually holds the requested name, when the
    /// lookup failed because of a category mismatch.
    pub fn suggested_category(&self) -> Option<Category> {
        match self {
            Error::Validation(ValidationError::CategoryMismatch { suggested, .. }) => {
                Some(*suggested)
            }
            _ => None,
        }
    }
}

/// Malformed caller input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown category \"{value}\" (expected one of: sequential, diverging, qualitative)")]
    UnknownCategory { value: String },

    /// The name exists, but under another category.
    #[error(
        "palette \"{name}\" is not a {requested} palette; it is {suggested}, retry with category \"{suggested}\""
    )]
    CategoryMismatch {
        name: String,
        requested: Category,
        suggested: Category,
    },

    #[error("cannot take {n} colors: value must be between 1 and {available}")]
    CountOutOfRange { n: usize, available: usize },

    #[error("invalid hex color \"{value}\" (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor { value: String },

    #[error("palette name must not be empty")]
    EmptyName,

    /// The name cannot be used as a file name inside a category directory.
    #[error("invalid palette name \"{value}\" (must not contain '/', '\\' or NUL, or be '.' or '..')")]
    InvalidName { value: String },

    #[error("palette \"{name}\" has no colors")]
    EmptyPalette { name: String },
}

/// What went wrong with a storage path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Missing,
    Read,
    Corrupt,
    Write,
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StorageErrorKind::Missing => "missing",
            StorageErrorKind::Read => "unreadable",
            StorageErrorKind::Corrupt => "corrupt",
            StorageErrorKind::Write => "not writable",
        };
        f.write_str(s)
    }
}

/// A file in the palette store is missing, unreadable, corrupt or unwritable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} is {kind}: {message}", .path.display())]
pub struct StorageError {
    pub path: PathBuf,
    pub kind: StorageErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(path: impl Into<PathBuf>, kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Classifies an I/O failure on read: `NotFound` maps to
    /// [`StorageErrorKind::Missing`], everything else to `Read`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            StorageErrorKind::Missing
        } else {
            StorageErrorKind::Read
        };
        Self::new(path, kind, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
