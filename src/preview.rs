//! Terminal previews of palettes.
//!
//! Graphical rendering is left to callers: anything that can draw a list
//! of colors implements [`Presenter`]. This module ships a plain
//! [`SwatchPresenter`] for terminals and a [`Gallery`] that renders one
//! page of the palette listing through a MiniJinja template.

use console::Style;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::color::HexColor;
use crate::index::{paginate, PaletteIndex};

/// Turns a retrieved color list into something displayable.
///
/// Only [`swatches`](Presenter::swatches) is required; [`Gallery`] calls
/// it for every row it renders.
pub trait Presenter {
    /// Renders the colors alone, without a name.
    fn swatches(&self, colors: &[HexColor]) -> String;

    /// Renders a named palette on one line.
    fn present(&self, name: &str, colors: &[HexColor]) -> String {
        format!("{} {}", name, self.swatches(colors))
    }
}

/// Renders each color as a colored block using the nearest ANSI-256
/// color, or as its hex code when color output is off.
#[derive(Debug, Clone)]
pub struct SwatchPresenter {
    use_color: bool,
    block: String,
}

impl SwatchPresenter {
    /// Creates a presenter that colors output when the terminal supports it.
    pub fn new() -> Self {
        Self::with_color(console::colors_enabled())
    }

    pub fn with_color(use_color: bool) -> Self {
        Self {
            use_color,
            block: "██".to_string(),
        }
    }

    /// Replaces the text drawn for each color.
    pub fn block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }
}

impl Default for SwatchPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for SwatchPresenter {
    fn swatches(&self, colors: &[HexColor]) -> String {
        if self.use_color {
            colors
                .iter()
                .map(|c| {
                    Style::new()
                        .color256(c.ansi256())
                        .force_styling(true)
                        .apply_to(self.block.as_str())
                        .to_string()
                })
                .collect()
        } else {
            colors
                .iter()
                .map(HexColor::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

/// Pads or truncates `s` to exactly `width` terminal columns.
///
/// Truncated text ends with `…`.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current <= width {
        return format!("{}{}", s, " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let limit = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out.push_str(&" ".repeat(limit - used));
    out
}

const GALLERY_TEMPLATE: &str = "\
{% for row in rows %}{{ row.name | fit(name_width) }} {{ row.category | fit(11) }} {{ row.count | fit(3) }} {{ row.colors | swatch }}
{% endfor %}page {{ number }} of {{ total_pages }} ({{ total_items }} palettes)
";

#[derive(Serialize)]
struct GalleryRow {
    name: String,
    category: String,
    count: usize,
    colors: Vec<String>,
}

#[derive(Serialize)]
struct GalleryPage {
    rows: Vec<GalleryRow>,
    number: usize,
    total_pages: usize,
    total_items: usize,
    name_width: usize,
}

/// Paginated listing of every palette with a swatch per row.
///
/// Any [`Presenter`] can draw the swatches; [`SwatchPresenter`] is the
/// terminal one.
///
/// # Example
///
/// ```rust
/// use chromabook::{Category, Gallery, PaletteDefinition, PaletteIndex, SwatchPresenter};
///
/// let mut index = PaletteIndex::new();
/// index.insert(PaletteDefinition::new("blues", Category::Sequential, ["#deebf7", "#3182bd"]).unwrap());
///
/// let gallery = Gallery::new(SwatchPresenter::with_color(false), 10).unwrap();
/// let page = gallery.render(&index, 1).unwrap();
/// assert!(page.contains("#deebf7 #3182bd"));
/// ```
pub struct Gallery {
    env: Environment<'static>,
    per_page: usize,
    name_width: usize,
}

impl Gallery {
    /// Creates a gallery showing `per_page` palettes per page, drawing
    /// each row's colors with `presenter`.
    pub fn new<P>(presenter: P, per_page: usize) -> Result<Self, Error>
    where
        P: Presenter + Send + Sync + 'static,
    {
        let mut env = Environment::new();

        env.add_filter("swatch", move |colors: Vec<String>| -> String {
            // Rows come from a compiled index, so every color parses.
            let parsed: Vec<HexColor> = colors
                .iter()
                .filter_map(|c| HexColor::parse(c).ok())
                .collect();
            presenter.swatches(&parsed)
        });
        env.add_filter("fit", |value: Value, width: usize| -> String {
            fit_to_width(&value.to_string(), width)
        });
        env.add_template("gallery", GALLERY_TEMPLATE)?;

        Ok(Self {
            env,
            per_page,
            name_width: 16,
        })
    }

    /// Sets the column width used for palette names.
    pub fn name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    /// Renders the 1-based page `number` of the index listing.
    pub fn render(&self, index: &PaletteIndex, number: usize) -> Result<String, Error> {
        let listing = index.list();
        let page = paginate(&listing, number, self.per_page);

        let rows = page
            .items
            .into_iter()
            .map(|summary| {
                let colors = index
                    .palettes(summary.category)
                    .get(&summary.name)
                    .map(|cs| cs.iter().map(|c| c.to_string()).collect())
                    .unwrap_or_default();
                GalleryRow {
                    name: summary.name,
                    category: summary.category.to_string(),
                    count: summary.count,
                    colors,
                }
            })
            .collect();

        let data = GalleryPage {
            rows,
            number: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            name_width: self.name_width,
        };
        self.env.get_template("gallery")?.render(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::definition::PaletteDefinition;

    fn colors(values: &[&str]) -> Vec<HexColor> {
        values.iter().map(|v| HexColor::parse(v).unwrap()).collect()
    }

    #[test]
    fn test_plain_swatches_list_hex_codes() {
        let presenter = SwatchPresenter::with_color(false);
        let out = presenter.present("blues", &colors(&["#deebf7", "#3182bd"]));
        assert_eq!(out, "blues #deebf7 #3182bd");
    }

    #[test]
    fn test_colored_swatches_use_ansi256() {
        let presenter = SwatchPresenter::with_color(true).block("#");
        let out = presenter.swatches(&colors(&["#ff0000"]));
        assert!(out.contains("\x1b[38;5;196m"));
        assert!(out.contains('#'));
    }

    struct CountPresenter;

    impl Presenter for CountPresenter {
        fn swatches(&self, colors: &[HexColor]) -> String {
            format!("<{} colors>", colors.len())
        }
    }

    #[test]
    fn test_default_present_uses_swatches() {
        let out = CountPresenter.present("rdbu", &colors(&["#b2182b", "#2166ac"]));
        assert_eq!(out, "rdbu <2 colors>");
    }

    #[test]
    fn test_gallery_accepts_any_presenter() {
        let mut index = PaletteIndex::new();
        index.insert(
            PaletteDefinition::new("blues", Category::Sequential, ["#deebf7", "#3182bd"]).unwrap(),
        );

        let gallery = Gallery::new(CountPresenter, 10).unwrap().name_width(6);
        let page = gallery.render(&index, 1).unwrap();
        assert!(page.contains("blues  sequential  2   <2 colors>"));
        assert!(!page.contains("#deebf7"));
    }

    #[test]
    fn test_fit_to_width() {
        assert_eq!(fit_to_width("abc", 5), "abc  ");
        assert_eq!(fit_to_width("abcde", 5), "abcde");
        assert_eq!(fit_to_width("abcdef", 5), "abcd…");
        assert_eq!(fit_to_width("abc", 0), "");
        assert_eq!(fit_to_width("日本語", 4), "日… ");
    }

    #[test]
    fn test_gallery_pages() {
        let mut index = PaletteIndex::new();
        for (name, category, cs) in [
            ("blues", Category::Sequential, vec!["#deebf7", "#9ecae1", "#3182bd"]),
            ("rdbu", Category::Diverging, vec!["#b2182b", "#2166ac"]),
            ("set2", Category::Qualitative, vec!["#66c2a5"]),
        ] {
            index.insert(PaletteDefinition::new(name, category, cs).unwrap());
        }

        let gallery = Gallery::new(SwatchPresenter::with_color(false), 2)
            .unwrap()
            .name_width(8);

        let first = gallery.render(&index, 1).unwrap();
        assert!(first.contains("blues    sequential  3   #deebf7 #9ecae1 #3182bd"));
        assert!(first.contains("rdbu"));
        assert!(!first.contains("set2"));
        assert!(first.contains("page 1 of 2 (3 palettes)"));

        let second = gallery.render(&index, 2).unwrap();
        assert!(second.contains("set2"));

        let beyond = gallery.render(&index, 3).unwrap();
        assert!(beyond.starts_with("page 3 of 2"));
    }
}
