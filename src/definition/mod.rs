//! Palette definitions: one named, categorized color list per file.
//!
//! This module provides:
//!
//! - [`PaletteDefinition`]: A validated palette ready to enter the index
//! - [`SkipReason`]: Why a definition file was left out of a compile
//! - [`parse_definition`]: Parse and validate one file's content
//! - [`discover_definitions`] / [`write_definition`]: The on-disk layout
//!
//! Definition files live at `<source>/<category>/<name>.<ext>` and carry
//! three keys: `name`, `type` (or `category`) and `colors`.

mod file;

pub use file::{
    discover_definitions, write_definition, DefinitionFile, DefinitionFormat,
    DEFINITION_EXTENSIONS,
};

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::color::{is_hex_color, HexColor};
use crate::error::ValidationError;

/// A validated palette definition.
///
/// Every color has passed [`HexColor`] validation and the list is never
/// empty. Definitions are immutable once built.
///
/// # Example
///
/// ```rust
/// use chromabook::{Category, PaletteDefinition};
///
/// let blues = PaletteDefinition::new(
///     "blues",
///     Category::Sequential,
///     ["#deebf7", "#9ecae1", "#3182bd"],
/// )
/// .unwrap();
/// assert_eq!(blues.colors().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteDefinition {
    name: String,
    category: Category,
    colors: Vec<HexColor>,
}

impl PaletteDefinition {
    /// Builds a definition, validating the name and every color.
    pub fn new<I, S>(name: &str, category: Category, colors: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_file_safe_name(name) {
            return Err(ValidationError::InvalidName {
                value: name.to_string(),
            });
        }
        let colors = colors
            .into_iter()
            .map(|c| HexColor::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.is_empty() {
            return Err(ValidationError::EmptyPalette {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            category,
            colors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    /// Splits the definition into its parts, for moving into an index.
    pub fn into_parts(self) -> (String, Category, Vec<HexColor>) {
        (self.name, self.category, self.colors)
    }
}

/// Returns true if `name` can be used as a definition file stem: no
/// path separators, no NUL, and not `.` or `..`.
pub fn is_file_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Why a definition file was not added to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be read or is not a well-formed record.
    Parse { message: String },
    /// One or more of `name`, `category`, `colors` is absent.
    MissingFields { fields: Vec<&'static str> },
    /// `category` is not one of the three known values.
    UnknownCategory { value: String },
    /// At least one color failed validation; all offenders are listed.
    InvalidColors { values: Vec<String> },
    /// `colors` is present but empty.
    EmptyColors,
    /// Both `type` and `category` are present and name different categories.
    ConflictingCategory { category: String, kind: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Parse { message } => write!(f, "could not parse definition: {}", message),
            SkipReason::MissingFields { fields } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            SkipReason::UnknownCategory { value } => write!(
                f,
                "unknown category \"{}\" (expected sequential, diverging or qualitative)",
                value
            ),
            SkipReason::InvalidColors { values } => {
                write!(f, "invalid hex colors: {}", values.join(", "))
            }
            SkipReason::EmptyColors => write!(f, "palette has no colors"),
            SkipReason::ConflictingCategory { category, kind } => write!(
                f,
                "conflicting category keys: category \"{}\" vs type \"{}\"",
                category, kind
            ),
        }
    }
}

/// The loosely-typed shape of a definition file, before validation.
#[derive(Debug, Default, Deserialize)]
struct RawDefinition {
    name: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    colors: Option<Vec<String>>,
}

impl RawDefinition {
    /// Merges `category` and `type`. Both may be given if they agree.
    fn declared_category(&mut self) -> Result<Option<String>, SkipReason> {
        match (self.category.take(), self.kind.take()) {
            (Some(category), Some(kind)) => {
                if category.trim().eq_ignore_ascii_case(kind.trim()) {
                    Ok(Some(category))
                } else {
                    Err(SkipReason::ConflictingCategory { category, kind })
                }
            }
            (category, kind) => Ok(category.or(kind)),
        }
    }
}

/// The shape written by [`write_definition`].
#[derive(Serialize)]
struct DefinitionRecord<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    category: Category,
    colors: &'a [HexColor],
}

impl<'a> From<&'a PaletteDefinition> for DefinitionRecord<'a> {
    fn from(def: &'a PaletteDefinition) -> Self {
        Self {
            name: &def.name,
            category: def.category,
            colors: &def.colors,
        }
    }
}

/// Parses and validates the content of one definition file.
///
/// Checks run in order: structure, required fields, category, colors.
/// The first failing check decides the [`SkipReason`].
pub fn parse_definition(
    content: &str,
    format: DefinitionFormat,
) -> Result<PaletteDefinition, SkipReason> {
    let raw: RawDefinition = match format {
        DefinitionFormat::Json => serde_json::from_str(content).map_err(|e| SkipReason::Parse {
            message: e.to_string(),
        })?,
        DefinitionFormat::Yaml => serde_yaml::from_str(content).map_err(|e| SkipReason::Parse {
            message: e.to_string(),
        })?,
    };
    validate(raw)
}

fn validate(mut raw: RawDefinition) -> Result<PaletteDefinition, SkipReason> {
    let category = raw.declared_category()?;
    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push("name");
    }
    if category.is_none() {
        missing.push("category");
    }
    if raw.colors.is_none() {
        missing.push("colors");
    }
    let (Some(name), Some(category), Some(colors)) = (name, category, raw.colors) else {
        return Err(SkipReason::MissingFields { fields: missing });
    };

    let category = Category::parse(&category)
        .map_err(|_| SkipReason::UnknownCategory { value: category })?;

    let invalid: Vec<String> = colors
        .iter()
        .filter(|c| !is_hex_color(c))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(SkipReason::InvalidColors { values: invalid });
    }
    if colors.is_empty() {
        return Err(SkipReason::EmptyColors);
    }

    let colors = colors
        .into_iter()
        .map(HexColor::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SkipReason::Parse {
            message: e.to_string(),
        })?;

    Ok(PaletteDefinition {
        name,
        category,
        colors,
    })
}
