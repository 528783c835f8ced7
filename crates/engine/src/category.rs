//! Closed set of purchase categories.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

/// Category of a shopping record.
///
/// The canonical label (what gets persisted and what the AI collaborator is
/// asked to return) is the Chinese label, e.g. `数码/电器`. Parsing is lenient
/// (see [`Category::parse_lenient`]): unknown text falls back to
/// [`Category::Other`] so a stray label never breaks loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Electronics,
    Clothing,
    Beauty,
    Food,
    Home,
    Books,
    Sports,
    Services,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Clothing,
        Category::Beauty,
        Category::Food,
        Category::Home,
        Category::Books,
        Category::Sports,
        Category::Services,
        Category::Other,
    ];

    /// Canonical label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Electronics => "数码/电器",
            Category::Clothing => "服饰/鞋包",
            Category::Beauty => "美妆/护肤",
            Category::Food => "食品/饮料",
            Category::Home => "家居/日用",
            Category::Books => "图书/文具",
            Category::Sports => "运动/户外",
            Category::Services => "虚拟/服务",
            Category::Other => "其他",
        }
    }

    /// ASCII slug accepted on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Beauty => "beauty",
            Category::Food => "food",
            Category::Home => "home",
            Category::Books => "books",
            Category::Sports => "sports",
            Category::Services => "services",
            Category::Other => "other",
        }
    }

    /// Strict parse: canonical label, slug or either half of the label.
    ///
    /// Input is NFKC-normalized first, so full-width slashes and spaces
    /// typed by an IME match too.
    #[must_use]
    pub fn parse(value: &str) -> Option<Category> {
        let norm = normalize(value);
        if norm.is_empty() {
            return None;
        }
        Category::ALL.into_iter().find(|category| {
            let label = category.label();
            norm == label
                || norm == category.slug()
                || label.split('/').any(|half| half == norm)
        })
    }

    /// Like [`Category::parse`] but maps unknown text to [`Category::Other`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Category {
        Category::parse(value).unwrap_or_default()
    }
}

fn normalize(value: &str) -> String {
    value
        .nfkc()
        .collect::<String>()
        .split_whitespace()
        .collect::<String>()
        .to_lowercase()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::parse_lenient(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_slugs_and_halves() {
        assert_eq!(Category::parse("数码/电器"), Some(Category::Electronics));
        assert_eq!(Category::parse("electronics"), Some(Category::Electronics));
        assert_eq!(Category::parse("Food"), Some(Category::Food));
        assert_eq!(Category::parse("鞋包"), Some(Category::Clothing));
        assert_eq!(Category::parse("其他"), Some(Category::Other));
    }

    #[test]
    fn normalizes_full_width_input() {
        assert_eq!(Category::parse("图书／文具"), Some(Category::Books));
        assert_eq!(Category::parse(" 运动 / 户外 "), Some(Category::Sports));
    }

    #[test]
    fn unknown_text_is_other_when_lenient() {
        assert_eq!(Category::parse("pets"), None);
        assert_eq!(Category::parse_lenient("pets"), Category::Other);
        let parsed: Category = serde_json::from_str("\"宠物\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }

    #[test]
    fn serializes_canonical_label() {
        assert_eq!(
            serde_json::to_string(&Category::Beauty).unwrap(),
            "\"美妆/护肤\""
        );
    }
}
