//! A palette store bound to a [`PaletteConfig`].

use std::path::PathBuf;

use crate::category::Category;
use crate::color::HexColor;
use crate::compile::{compile, CompileReport};
use crate::config::PaletteConfig;
use crate::definition::{write_definition, PaletteDefinition};
use crate::error::Result;
use crate::index::{PaletteIndex, PaletteSummary};
use crate::journal::{FileLog, LogSink, NullLog};

/// Compile, load and query palettes using one set of paths.
///
/// The compiled index is loaded lazily on the first lookup and reused
/// until the next [`compile`](Self::compile) or [`reload`](Self::reload).
///
/// # Example
///
/// ```rust,no_run
/// use chromabook::{PaletteConfig, PaletteStore};
///
/// let mut store = PaletteStore::new(PaletteConfig::default());
/// store.compile();
/// let blues = store.get("blues", "sequential", Some(2))?;
/// # Ok::<(), chromabook::Error>(())
/// ```
#[derive(Debug)]
pub struct PaletteStore {
    config: PaletteConfig,
    index: Option<PaletteIndex>,
}

impl PaletteStore {
    pub fn new(config: PaletteConfig) -> Self {
        Self {
            config,
            index: None,
        }
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Writes a new definition into the source directory.
    ///
    /// The definition is not visible to lookups until the next compile.
    pub fn create(&self, definition: &PaletteDefinition) -> Result<PathBuf> {
        Ok(write_definition(self.config.source_dir(), definition)?)
    }

    /// Compiles the source directory, logging to the configured log file
    /// if there is one. A freshly written index replaces the cached one.
    pub fn compile(&mut self) -> CompileReport {
        let mut sink: Box<dyn LogSink> = match self.config.log_path() {
            Some(path) => Box::new(FileLog::new(path)),
            None => Box::new(NullLog),
        };
        self.compile_with(&mut *sink)
    }

    /// Compiles with an explicit log sink.
    pub fn compile_with(&mut self, log: &mut dyn LogSink) -> CompileReport {
        let report = compile(self.config.source_dir(), self.config.index_path(), log);
        if report.is_written() {
            self.index = Some(report.index().clone());
        }
        report
    }

    /// Returns the compiled index, loading it from disk if needed.
    pub fn load(&mut self) -> Result<&PaletteIndex> {
        let index = match self.index.take() {
            Some(index) => index,
            None => PaletteIndex::load(self.config.index_path())?,
        };
        Ok(self.index.insert(index))
    }

    /// Drops the cached index and reads it again from disk.
    pub fn reload(&mut self) -> Result<&PaletteIndex> {
        self.index = None;
        self.load()
    }

    /// See [`PaletteIndex::get`].
    pub fn get(&mut self, name: &str, category: &str, n: Option<usize>) -> Result<Vec<HexColor>> {
        Ok(self.load()?.get(name, category, n)?.to_vec())
    }

    /// See [`PaletteIndex::get_typed`].
    pub fn get_typed(
        &mut self,
        name: &str,
        category: Category,
        n: Option<usize>,
    ) -> Result<Vec<HexColor>> {
        Ok(self.load()?.get_typed(name, category, n)?.to_vec())
    }

    /// See [`PaletteIndex::list`].
    pub fn list(&mut self) -> Result<Vec<PaletteSummary>> {
        Ok(self.load()?.list())
    }
}
