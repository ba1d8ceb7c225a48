use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Category, CoreError};

/// Category selector for the catalog filter. `All` keeps every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Ordering applied to the filtered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name, A to Z.
    #[default]
    NameAsc,
    /// Highest rating first.
    RatingDesc,
    /// Cheapest first.
    PriceAsc,
    /// Smallest image area first.
    SizeAsc,
    /// Largest image area first.
    SizeDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::NameAsc,
        SortKey::RatingDesc,
        SortKey::PriceAsc,
        SortKey::SizeAsc,
        SortKey::SizeDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::SizeAsc => "size-asc",
            SortKey::SizeDesc => "size-desc",
        }
    }

    /// Human-readable label, e.g. for a sort dropdown.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::RatingDesc => "Rating (High-Low)",
            SortKey::PriceAsc => "Price (Low-High)",
            SortKey::SizeAsc => "Image Size (Small-Large)",
            SortKey::SizeDesc => "Image Size (Large-Small)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| CoreError::InvalidSortKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_all_matches_everything() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.matches(category));
        }
    }

    #[test]
    fn category_filter_only_matches_one() {
        let filter = CategoryFilter::Only(Category::Gaming);
        assert!(filter.matches(Category::Gaming));
        assert!(!filter.matches(Category::School));
    }

    #[test]
    fn category_filter_parses_sentinel_and_concrete() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "animals".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Animals)
        );
        assert!("memes".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn category_filter_display_roundtrips() {
        for filter in [CategoryFilter::All, CategoryFilter::Only(Category::Random)] {
            assert_eq!(filter.to_string().parse::<CategoryFilter>().unwrap(), filter);
        }
    }

    #[test]
    fn sort_key_parses_every_variant() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn sort_key_rejects_unknown() {
        assert!(matches!(
            "price-desc".parse::<SortKey>(),
            Err(CoreError::InvalidSortKey(ref s)) if s == "price-desc"
        ));
    }

    #[test]
    fn sort_key_default_is_name_asc() {
        assert_eq!(SortKey::default(), SortKey::NameAsc);
    }
}
