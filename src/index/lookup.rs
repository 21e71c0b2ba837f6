//! Palette retrieval and listing.

use serde::Serialize;

use super::PaletteIndex;
use crate::category::Category;
use crate::color::HexColor;
use crate::error::{Error, Result, ValidationError};

/// One line of [`PaletteIndex::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteSummary {
    pub name: String,
    pub category: Category,
    pub count: usize,
}

impl PaletteIndex {
    /// Looks up a palette by name and category name.
    ///
    /// Returns the full color list, or the first `n` colors in stored
    /// order when `n` is given.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownCategory`] if `category` is not a known category
    /// - [`ValidationError::CategoryMismatch`] if `name` lives under another category
    /// - [`ValidationError::CountOutOfRange`] if `n` is 0 or exceeds the palette size
    /// - [`Error::NotFound`] if no category holds `name`
    ///
    /// # Example
    ///
    /// ```rust
    /// use chromabook::{Category, PaletteDefinition, PaletteIndex};
    ///
    /// let mut index = PaletteIndex::new();
    /// index.insert(
    ///     PaletteDefinition::new("blues", Category::Sequential, ["#deebf7", "#9ecae1", "#3182bd"])
    ///         .unwrap(),
    /// );
    ///
    /// let two = index.get("blues", "sequential", Some(2)).unwrap();
    /// assert_eq!(two, ["#deebf7", "#9ecae1"]);
    ///
    /// let err = index.get("blues", "qualitative", None).unwrap_err();
    /// assert_eq!(err.suggested_category(), Some(Category::Sequential));
    /// ```
    pub fn get(&self, name: &str, category: &str, n: Option<usize>) -> Result<&[HexColor]> {
        let category = Category::parse(category)?;
        self.get_typed(name, category, n)
    }

    /// Like [`get`](Self::get), with an already parsed category.
    pub fn get_typed(&self, name: &str, category: Category, n: Option<usize>) -> Result<&[HexColor]> {
        let Some(colors) = self.palettes(category).get(name) else {
            return Err(self.miss(name, category));
        };
        match n {
            None => Ok(colors.as_slice()),
            Some(n) if (1..=colors.len()).contains(&n) => Ok(&colors[..n]),
            Some(n) => Err(ValidationError::CountOutOfRange {
                n,
                available: colors.len(),
            }
            .into()),
        }
    }

    /// The category that holds `name`, searching in scan order.
    pub fn find_category(&self, name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.contains(*category, name))
    }

    fn miss(&self, name: &str, requested: Category) -> Error {
        match self.find_category(name) {
            Some(suggested) => ValidationError::CategoryMismatch {
                name: name.to_string(),
                requested,
                suggested,
            }
            .into(),
            None => Error::NotFound {
                name: name.to_string(),
            },
        }
    }

    /// Summarizes every palette.
    ///
    /// Categories come in scan order; within a category palettes are
    /// sorted by descending color count, then by name.
    pub fn list(&self) -> Vec<PaletteSummary> {
        let mut out = Vec::with_capacity(self.len());
        for category in Category::ALL {
            let mut entries: Vec<PaletteSummary> = self
                .palettes(category)
                .iter()
                .map(|(name, colors)| PaletteSummary {
                    name: name.clone(),
                    category,
                    count: colors.len(),
                })
                .collect();
            entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
            out.extend(entries);
        }
        out
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// 1-based page number as requested.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slices `items` into the 1-based page `number` of `per_page` entries.
///
/// A `per_page` of 0, a page number of 0, or a page past the end yields
/// an empty page.
pub fn paginate<T: Clone>(items: &[T], number: usize, per_page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    };

    let page_items = if number == 0 || number > total_pages {
        Vec::new()
    } else {
        let start = (number - 1) * per_page;
        let end = (start + per_page).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        number,
        total_pages,
        total_items,
        items: page_items,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::definition::PaletteDefinition;
    use proptest::prelude::*;

    fn hex_colors() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("#[0-9a-fA-F]{6}([0-9a-fA-F]{2})?", 1..16)
    }

    proptest! {
        #[test]
        fn get_without_n_returns_all_colors_in_order(colors in hex_colors()) {
            let mut index = PaletteIndex::new();
            index.insert(PaletteDefinition::new("p", Category::Diverging, &colors).unwrap());

            let got: Vec<&str> = index
                .get("p", "diverging", None)
                .unwrap()
                .iter()
                .map(|c| c.as_str())
                .collect();
            prop_assert_eq!(got, colors.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn get_with_n_is_a_prefix(colors in hex_colors(), pick in 0usize..32) {
            let mut index = PaletteIndex::new();
            index.insert(PaletteDefinition::new("p", Category::Sequential, &colors).unwrap());
            let all = index.get("p", "sequential", None).unwrap().to_vec();

            let n = pick % (colors.len() + 2);
            let result = index.get("p", "sequential", Some(n));
            if (1..=colors.len()).contains(&n) {
                prop_assert_eq!(result.unwrap(), &all[..n]);
            } else {
                prop_assert!(result.unwrap_err().is_validation());
            }
        }

        #[test]
        fn list_is_sorted_within_category(
            sizes in prop::collection::vec(1usize..10, 1..12),
        ) {
            let mut index = PaletteIndex::new();
            for (i, size) in sizes.iter().enumerate() {
                let colors = vec!["#123456"; *size];
                let def = PaletteDefinition::new(&format!("p{i}"), Category::Qualitative, colors).unwrap();
                index.insert(def);
            }

            let listed = index.list();
            prop_assert_eq!(listed.len(), sizes.len());
            for pair in listed.windows(2) {
                prop_assert!(
                    pair[0].count > pair[1].count
                        || (pair[0].count == pair[1].count && pair[0].name < pair[1].name)
                );
            }
        }
    }
}
