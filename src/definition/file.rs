//! On-disk layout of definition files.

use std::path::{Path, PathBuf};

use super::{is_file_safe_name, DefinitionRecord, PaletteDefinition};
use crate::category::Category;
use crate::error::{StorageError, StorageErrorKind};

/// Recognized definition file extensions.
pub const DEFINITION_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Serialization format of a definition file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// Returns the format for a file extension, or `None` if the
    /// extension is not in [`DEFINITION_EXTENSIONS`].
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DefinitionFormat::Json),
            "yaml" | "yml" => Some(DefinitionFormat::Yaml),
            _ => None,
        }
    }
}

/// A candidate definition file found during discovery.
///
/// Content is not read at discovery time; the compiler reads and parses
/// each file in turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFile {
    /// The category subdirectory the file was found in.
    pub directory: Category,
    /// Full path to the file.
    pub path: PathBuf,
    pub format: DefinitionFormat,
}

impl DefinitionFile {
    pub fn new(directory: Category, path: impl Into<PathBuf>, format: DefinitionFormat) -> Self {
        Self {
            directory,
            path: path.into(),
            format,
        }
    }

    /// Reads the file content.
    pub fn read(&self) -> Result<String, StorageError> {
        std::fs::read_to_string(&self.path).map_err(|e| StorageError::from_read(&self.path, e))
    }
}

/// Collects candidate definition files under `source_dir`.
///
/// Only the three category subdirectories are scanned, in
/// [`Category::ALL`] order, and only files directly inside them.
/// Within a directory files are returned in path order. Missing or
/// unreadable category directories contribute nothing.
pub fn discover_definitions(source_dir: impl AsRef<Path>) -> Vec<DefinitionFile> {
    let source_dir = source_dir.as_ref();
    let mut files = Vec::new();

    for category in Category::ALL {
        let dir = source_dir.join(category.as_str());
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("skipping {}: {}", dir.display(), e);
                continue;
            }
        };

        let mut found: Vec<DefinitionFile> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let format = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(DefinitionFormat::from_extension)?;
                Some(DefinitionFile::new(category, path, format))
            })
            .collect();
        found.sort_by(|a, b| a.path.cmp(&b.path));
        files.extend(found);
    }

    files
}

/// Writes a definition to `<source_dir>/<category>/<name>.json`.
///
/// The category directory is created if needed and an existing file of
/// the same name is replaced. Returns the written path.
///
/// Names that would resolve outside the category directory are refused
/// with [`StorageErrorKind::Write`] and nothing is written.
pub fn write_definition(
    source_dir: impl AsRef<Path>,
    definition: &PaletteDefinition,
) -> Result<PathBuf, StorageError> {
    let dir = source_dir.as_ref().join(definition.category().as_str());
    if !is_file_safe_name(definition.name()) {
        return Err(StorageError::new(
            &dir,
            StorageErrorKind::Write,
            format!("\"{}\" is not usable as a file name", definition.name()),
        ));
    }
    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::new(&dir, StorageErrorKind::Write, e.to_string()))?;

    let path = dir.join(format!("{}.json", definition.name()));
    let record = DefinitionRecord::from(definition);
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| StorageError::new(&path, StorageErrorKind::Write, e.to_string()))?;
    std::fs::write(&path, json + "\n")
        .map_err(|e| StorageError::new(&path, StorageErrorKind::Write, e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{parse_definition, SkipReason};

    fn touch(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DefinitionFormat::from_extension("json"),
            Some(DefinitionFormat::Json)
        );
        assert_eq!(
            DefinitionFormat::from_extension("YML"),
            Some(DefinitionFormat::Yaml)
        );
        assert_eq!(DefinitionFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_discover_scans_only_category_dirs_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("qualitative/set2.json"), "{}");
        touch(&root.join("sequential/reds.yaml"), "{}");
        touch(&root.join("sequential/blues.json"), "{}");
        touch(&root.join("diverging/rdbu.yml"), "{}");
        touch(&root.join("cyclic/twilight.json"), "{}");
        touch(&root.join("sequential/notes.txt"), "ignored");
        touch(&root.join("sequential/nested/deep.json"), "{}");

        let files = discover_definitions(root);
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["blues.json", "reds.yaml", "rdbu.yml", "set2.json"]);
        assert_eq!(files[0].directory, Category::Sequential);
        assert_eq!(files[1].format, DefinitionFormat::Yaml);
        assert_eq!(files[3].directory, Category::Qualitative);
    }

    #[test]
    fn test_discover_missing_source_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discover_definitions(tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn test_write_then_parse() {
        let tmp = tempfile::tempdir().unwrap();
        let def = PaletteDefinition::new(
            "greens",
            Category::Sequential,
            ["#e5f5e0", "#a1d99b", "#31a354"],
        )
        .unwrap();

        let path = write_definition(tmp.path(), &def).unwrap();
        assert_eq!(path, tmp.path().join("sequential/greens.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"type\": \"sequential\""));
        let back: Result<PaletteDefinition, SkipReason> =
            parse_definition(&content, DefinitionFormat::Json);
        assert_eq!(back.unwrap(), def);
    }

    #[test]
    fn test_write_stays_inside_category_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("palettes");

        assert!(PaletteDefinition::new("../../escaped", Category::Sequential, ["#000000"]).is_err());

        // Parsed definitions keep any name; writing one that escapes is refused.
        let parsed = parse_definition(
            r##"{"name": "../../escaped", "type": "sequential", "colors": ["#000000"]}"##,
            DefinitionFormat::Json,
        )
        .unwrap();
        let err = write_definition(&src, &parsed).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Write);
        assert!(!tmp.path().join("escaped.json").exists());
        assert!(discover_definitions(&src).is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let file = DefinitionFile::new(
            Category::Diverging,
            "/definitely/not/here.json",
            DefinitionFormat::Json,
        );
        let err = file.read().unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Missing);
    }
}
