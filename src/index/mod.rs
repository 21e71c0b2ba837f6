//! The compiled palette index.
//!
//! A [`PaletteIndex`] maps each [`Category`] to the palettes compiled
//! under it, keyed by name. It is the unit of persistence: compiling
//! rebuilds it from scratch and writes it as one JSON file, and lookups
//! load that file read-only.
//!
//! # Format
//!
//! ```json
//! {
//!   "sequential": { "blues": ["#deebf7", "#9ecae1", "#3182bd"] },
//!   "diverging": {},
//!   "qualitative": {}
//! }
//! ```
//!
//! Names are kept sorted, so loading an index and saving it again
//! produces the same bytes.

mod lookup;

pub use lookup::{paginate, Page, PaletteSummary};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::color::HexColor;
use crate::definition::PaletteDefinition;
use crate::error::{StorageError, StorageErrorKind};

/// Palettes of one category, by name.
pub type CategoryPalettes = BTreeMap<String, Vec<HexColor>>;

/// Consolidated `category -> name -> colors` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteIndex {
    #[serde(default)]
    sequential: CategoryPalettes,
    #[serde(default)]
    diverging: CategoryPalettes,
    #[serde(default)]
    qualitative: CategoryPalettes,
}

impl PaletteIndex {
    /// Creates an index with three empty categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Palettes stored under `category`.
    pub fn palettes(&self, category: Category) -> &CategoryPalettes {
        match category {
            Category::Sequential => &self.sequential,
            Category::Diverging => &self.diverging,
            Category::Qualitative => &self.qualitative,
        }
    }

    fn palettes_mut(&mut self, category: Category) -> &mut CategoryPalettes {
        match category {
            Category::Sequential => &mut self.sequential,
            Category::Diverging => &mut self.diverging,
            Category::Qualitative => &mut self.qualitative,
        }
    }

    /// Adds a definition, replacing any palette with the same
    /// `(category, name)`. Returns the replaced colors, if any.
    pub fn insert(&mut self, definition: PaletteDefinition) -> Option<Vec<HexColor>> {
        let (name, category, colors) = definition.into_parts();
        self.palettes_mut(category).insert(name, colors)
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.palettes(category).contains_key(name)
    }

    /// Number of palettes in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.palettes(category).len()
    }

    /// Total number of palettes across all categories.
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads an index from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the file is missing, cannot be read,
    /// or does not hold a well-formed index (including invalid colors or
    /// unknown category keys).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StorageError::from_read(path, e))?;
        Self::from_json(&content)
            .map_err(|e| StorageError::new(path, StorageErrorKind::Corrupt, e.to_string()))
    }

    /// Writes the index as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = path.as_ref();
        let write_err = |message: String| StorageError::new(path, StorageErrorKind::Write, message);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let json = self.to_json().map_err(|e| write_err(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| write_err(e.to_string()))
    }

    /// Parses an index from its JSON text.
    ///
    /// Besides the shape and color checks done while deserializing, every
    /// palette must have a non-blank name and at least one color, as a
    /// compile run guarantees.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let index: Self = serde_json::from_str(content)?;
        for category in Category::ALL {
            for (name, colors) in index.palettes(category) {
                if name.trim().is_empty() {
                    return Err(serde_json::Error::custom(format!(
                        "{} palette with a blank name",
                        category
                    )));
                }
                if colors.is_empty() {
                    return Err(serde_json::Error::custom(format!(
                        "{} palette \"{}\" has no colors",
                        category, name
                    )));
                }
            }
        }
        Ok(index)
    }

    /// Serializes the index as the exact text [`save`](Self::save) writes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, category: Category, colors: &[&str]) -> PaletteDefinition {
        PaletteDefinition::new(name, category, colors).unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let index = PaletteIndex::new();
        assert!(index.is_empty());
        for category in Category::ALL {
            assert_eq!(index.count(category), 0);
        }
    }

    #[test]
    fn test_insert_and_overwrite() {
        let mut index = PaletteIndex::new();
        assert!(index
            .insert(def("blues", Category::Sequential, &["#000000"]))
            .is_none());

        let previous = index.insert(def("blues", Category::Sequential, &["#ffffff", "#eeeeee"]));
        assert_eq!(previous.unwrap(), ["#000000"]);
        assert_eq!(index.palettes(Category::Sequential)["blues"], ["#ffffff", "#eeeeee"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_same_name_different_categories_coexist() {
        let mut index = PaletteIndex::new();
        index.insert(def("mix", Category::Sequential, &["#000000"]));
        index.insert(def("mix", Category::Qualitative, &["#111111"]));
        assert!(index.contains(Category::Sequential, "mix"));
        assert!(index.contains(Category::Qualitative, "mix"));
        assert!(!index.contains(Category::Diverging, "mix"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_json_always_has_all_categories() {
        let json = PaletteIndex::new().to_json().unwrap();
        assert!(json.contains("\"sequential\": {}"));
        assert!(json.contains("\"diverging\": {}"));
        assert!(json.contains("\"qualitative\": {}"));
    }

    #[test]
    fn test_from_json_missing_keys_default_empty() {
        let index = PaletteIndex::from_json(r##"{"diverging": {"rdbu": ["#b2182b"]}}"##).unwrap();
        assert_eq!(index.count(Category::Diverging), 1);
        assert_eq!(index.count(Category::Sequential), 0);
    }

    #[test]
    fn test_from_json_rejects_bad_content() {
        assert!(PaletteIndex::from_json(r#"{"cyclic": {}}"#).is_err());
        assert!(PaletteIndex::from_json(r#"{"sequential": {"x": ["nope"]}}"#).is_err());
        assert!(PaletteIndex::from_json("[]").is_err());
    }

    #[test]
    fn test_from_json_rejects_what_compile_never_writes() {
        assert!(PaletteIndex::from_json(r#"{"sequential": {"": []}}"#).is_err());
        assert!(PaletteIndex::from_json(r##"{"diverging": {"  ": ["#000000"]}}"##).is_err());
        assert!(PaletteIndex::from_json(r#"{"qualitative": {"set2": []}}"#).is_err());
    }

    #[test]
    fn test_load_blank_palette_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("index.json");
        std::fs::write(&path, r#"{"sequential": {"": []}}"#).unwrap();
        let err = PaletteIndex::load(&path).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Corrupt);
    }

    #[test]
    fn test_save_load_is_byte_stable() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/index.json");

        let mut index = PaletteIndex::new();
        index.insert(def("reds", Category::Sequential, &["#fee0d2", "#de2d26"]));
        index.insert(def("blues", Category::Sequential, &["#DEEBF7", "#3182bd80"]));
        index.insert(def("set2", Category::Qualitative, &["#66c2a5"]));
        index.save(&path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        let loaded = PaletteIndex::load(&path).unwrap();
        assert_eq!(loaded, index);
        loaded.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_load_missing_and_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = PaletteIndex::load(tmp.path().join("absent.json")).unwrap_err();
        assert_eq!(missing.kind, StorageErrorKind::Missing);

        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        let corrupt = PaletteIndex::load(&path).unwrap_err();
        assert_eq!(corrupt.kind, StorageErrorKind::Corrupt);
    }
}
