//! # Chromabook - named color palettes for data visualization
//!
//! Chromabook keeps palettes as one small definition file each, compiles
//! them into a single index for fast loading, and answers lookups by
//! name and category.
//!
//! ## Layout
//!
//! ```text
//! palettes/
//!   sequential/blues.json
//!   diverging/rdbu.yaml
//!   qualitative/set2.json
//!   index.json            <- written by compile
//! ```
//!
//! A definition file has three keys:
//!
//! ```json
//! { "name": "blues", "type": "sequential", "colors": ["#deebf7", "#9ecae1", "#3182bd"] }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chromabook::{compile, FileLog, PaletteIndex};
//!
//! let mut log = FileLog::new("palettes/compile.log");
//! let report = compile("palettes", "palettes/index.json", &mut log);
//! println!("{} palettes compiled", report.index().len());
//!
//! let index = PaletteIndex::load("palettes/index.json")?;
//! let blues = index.get("blues", "sequential", Some(2))?;
//! assert_eq!(blues, ["#deebf7", "#9ecae1"]);
//! # Ok::<(), chromabook::Error>(())
//! ```
//!
//! ## Lookups
//!
//! [`PaletteIndex::get`] never guesses. Asking for a palette under the
//! wrong category fails with a validation error that names the category
//! the palette actually lives in:
//!
//! ```rust
//! use chromabook::{Category, PaletteDefinition, PaletteIndex};
//!
//! let mut index = PaletteIndex::new();
//! index.insert(PaletteDefinition::new("set2", Category::Qualitative, ["#66c2a5"]).unwrap());
//!
//! let err = index.get("set2", "sequential", None).unwrap_err();
//! assert_eq!(err.suggested_category(), Some(Category::Qualitative));
//! ```
//!
//! ## Modules
//!
//! - [`compile`](mod@compile): definition files to index, with per-file outcomes
//! - [`index`]: the compiled index, lookup, listing and pagination
//! - [`definition`]: definition parsing, discovery and authoring
//! - [`preview`]: terminal swatches and a paginated gallery
//! - [`journal`]: append-only compile logs

pub mod category;
pub mod color;
pub mod compile;
pub mod config;
pub mod definition;
pub mod error;
pub mod index;
pub mod journal;
pub mod preview;
pub mod store;

pub use category::Category;
pub use color::{is_hex_color, HexColor};
pub use compile::{compile, CompileReport, CompileStatus, FileAction, FileOutcome, SkipReason};
pub use config::PaletteConfig;
pub use definition::{write_definition, PaletteDefinition};
pub use error::{Error, Result, StorageError, StorageErrorKind, ValidationError};
pub use index::{paginate, Page, PaletteIndex, PaletteSummary};
pub use journal::{FileLog, Level, LogSink, MemoryLog, NullLog};
pub use preview::{Gallery, Presenter, SwatchPresenter};
pub use store::PaletteStore;
