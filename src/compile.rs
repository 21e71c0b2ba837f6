//! Compiling definition files into one palette index.
//!
//! [`compile`] is best-effort: a bad definition file is skipped with a
//! warning and the run carries on. Only two conditions end a run
//! without a fresh index on disk, and neither is returned as an error:
//!
//! - no candidate files at all ([`CompileStatus::NoDefinitions`]); the
//!   index is not touched
//! - the index cannot be written ([`CompileStatus::WriteFailed`])
//!
//! Zero *valid* definitions is not a failure: an index with three empty
//! categories is written.

use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::definition::{discover_definitions, parse_definition, DefinitionFile};
use crate::error::StorageError;
use crate::index::PaletteIndex;
use crate::journal::LogSink;

pub use crate::definition::SkipReason;

/// What happened to one definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Inserted as a new palette.
    Added { category: Category, name: String },
    /// Replaced a palette with the same category and name seen earlier.
    Replaced { category: Category, name: String },
    /// Left out of the index.
    Skipped(SkipReason),
}

/// Per-file result of a compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub action: FileAction,
}

/// How a compile run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileStatus {
    /// The index was written.
    Written,
    /// No candidate files were found; nothing was written.
    NoDefinitions,
    /// The index was built but could not be persisted.
    WriteFailed(StorageError),
}

/// Everything a compile run produced.
#[derive(Debug, Clone)]
pub struct CompileReport {
    index_path: PathBuf,
    status: CompileStatus,
    outcomes: Vec<FileOutcome>,
    index: PaletteIndex,
}

impl CompileReport {
    /// The output path the run targeted.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn status(&self) -> &CompileStatus {
        &self.status
    }

    /// True if a fresh index is on disk.
    pub fn is_written(&self) -> bool {
        self.status == CompileStatus::Written
    }

    /// Per-file outcomes in discovery order.
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// The index as compiled, whether or not it was persisted.
    pub fn index(&self) -> &PaletteIndex {
        &self.index
    }

    pub fn into_index(self) -> PaletteIndex {
        self.index
    }

    /// Palettes accepted into `category`.
    pub fn count(&self, category: Category) -> usize {
        self.index.count(category)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, FileAction::Skipped(_)))
    }

    pub fn replaced(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, FileAction::Replaced { .. }))
    }
}

/// Compiles every definition under `source_dir` into `index_path`.
///
/// Candidates are read from the `sequential`, `diverging` and
/// `qualitative` subdirectories, in that order. Every event is appended
/// to `log`.
///
/// # Example
///
/// ```rust,no_run
/// use chromabook::{compile, MemoryLog};
///
/// let mut log = MemoryLog::new();
/// let report = compile("palettes", "palettes/index.json", &mut log);
/// if report.is_written() {
///     println!("wrote {}", report.index_path().display());
/// }
/// ```
pub fn compile(
    source_dir: impl AsRef<Path>,
    index_path: impl AsRef<Path>,
    log: &mut dyn LogSink,
) -> CompileReport {
    let source_dir = source_dir.as_ref();
    let index_path = index_path.as_ref().to_path_buf();

    log.info(&format!(
        "compiling palettes from {} into {}",
        source_dir.display(),
        index_path.display()
    ));

    let candidates = discover_definitions(source_dir);
    if candidates.is_empty() {
        log.warn(&format!(
            "no definition files found under {} (looked in sequential, diverging, qualitative); index not written",
            source_dir.display()
        ));
        return CompileReport {
            index_path,
            status: CompileStatus::NoDefinitions,
            outcomes: Vec::new(),
            index: PaletteIndex::new(),
        };
    }

    let mut index = PaletteIndex::new();
    let mut outcomes = Vec::with_capacity(candidates.len());
    for file in &candidates {
        let action = compile_one(file, &mut index, log);
        outcomes.push(FileOutcome {
            path: file.path.clone(),
            action,
        });
    }

    log.info(&format!(
        "compiled {} palettes (sequential: {}, diverging: {}, qualitative: {})",
        index.len(),
        index.count(Category::Sequential),
        index.count(Category::Diverging),
        index.count(Category::Qualitative),
    ));

    let status = match index.save(&index_path) {
        Ok(()) => {
            log.info(&format!("wrote index to {}", index_path.display()));
            CompileStatus::Written
        }
        Err(e) => {
            log.error(&format!("failed to write index: {}", e));
            CompileStatus::WriteFailed(e)
        }
    };

    CompileReport {
        index_path,
        status,
        outcomes,
        index,
    }
}

fn compile_one(file: &DefinitionFile, index: &mut PaletteIndex, log: &mut dyn LogSink) -> FileAction {
    let path = file.path.display();

    let parsed = file
        .read()
        .map_err(|e| SkipReason::Parse {
            message: e.to_string(),
        })
        .and_then(|content| parse_definition(&content, file.format));

    let definition = match parsed {
        Ok(definition) => definition,
        Err(reason) => {
            log.warn(&format!("skipped {}: {}", path, reason));
            return FileAction::Skipped(reason);
        }
    };

    let category = definition.category();
    let name = definition.name().to_string();
    let count = definition.colors().len();

    if category != file.directory {
        log.info(&format!(
            "{} declares category {} but sits in the {} directory; using {}",
            path, category, file.directory, category
        ));
    }

    if index.insert(definition).is_some() {
        log.warn(&format!(
            "overwrote {} palette \"{}\" with {} ({} colors)",
            category, name, path, count
        ));
        FileAction::Replaced { category, name }
    } else {
        log.info(&format!(
            "added {} palette \"{}\" ({} colors) from {}",
            category, name, count, path
        ));
        FileAction::Added { category, name }
    }
}
