use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A catalog entry as delivered by the catalog source, before enrichment.
///
/// Identity is `id`; two fetches returning the same `id` describe the same item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    /// Location of the item's image, e.g. `"https://i.imgflip.com/30b1gx.jpg"`.
    pub image_ref: String,
    pub width: u32,
    pub height: u32,
    pub box_count: u32,
}

impl CatalogItem {
    /// Pixel area of the item's image, used by the size comparators.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Star rating in the closed range `1..=5`.
///
/// Deserialization rejects out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Builds a rating, clamping `value` into `1..=5`.
    #[must_use]
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidRating(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of categories an item can be assigned.
///
/// "All" is not a category but a filter sentinel; see
/// [`crate::CategoryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Animals,
    Celebrities,
    Gaming,
    School,
    Random,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Animals,
        Category::Celebrities,
        Category::Gaming,
        Category::School,
        Category::Random,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Celebrities => "celebrities",
            Category::Gaming => "gaming",
            Category::School => "school",
            Category::Random => "random",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidCategory(s.to_string()))
    }
}

/// The stable classification remembered for an item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub rating: Rating,
    pub category: Category,
}

/// A [`CatalogItem`] carrying its stable classification and derived price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub rating: Rating,
    pub category: Category,
    /// `rating * unit_price` at enrichment time.
    pub price: u32,
}

impl EnrichedItem {
    #[must_use]
    pub fn new(item: CatalogItem, metadata: ItemMetadata, unit_price: u32) -> Self {
        Self {
            item,
            rating: metadata.rating,
            category: metadata.category,
            price: u32::from(metadata.rating.get()).saturating_mul(unit_price),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.item.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    #[must_use]
    pub fn metadata(&self) -> ItemMetadata {
        ItemMetadata {
            rating: self.rating,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, width: u32, height: u32) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: "Drake Hotline Bling".to_string(),
            image_ref: "https://i.imgflip.com/30b1gx.jpg".to_string(),
            width,
            height,
            box_count: 2,
        }
    }

    #[test]
    fn rating_accepts_bounds() {
        assert_eq!(Rating::try_from(1).unwrap().get(), 1);
        assert_eq!(Rating::try_from(5).unwrap().get(), 5);
    }

    #[test]
    fn rating_rejects_zero_and_six() {
        assert!(matches!(Rating::try_from(0), Err(CoreError::InvalidRating(0))));
        assert!(matches!(Rating::try_from(6), Err(CoreError::InvalidRating(6))));
    }

    #[test]
    fn rating_clamped_stays_in_range() {
        assert_eq!(Rating::clamped(0).get(), 1);
        assert_eq!(Rating::clamped(3).get(), 3);
        assert_eq!(Rating::clamped(200).get(), 5);
    }

    #[test]
    fn rating_deserialize_rejects_out_of_range() {
        let result = serde_json::from_str::<Rating>("9");
        assert!(result.is_err(), "expected rating 9 to be rejected");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Gaming".parse::<Category>().unwrap(), Category::Gaming);
        assert_eq!(" school ".parse::<Category>().unwrap(), Category::School);
    }

    #[test]
    fn category_rejects_all_sentinel() {
        assert!(matches!(
            "All".parse::<Category>(),
            Err(CoreError::InvalidCategory(_))
        ));
    }

    #[test]
    fn area_does_not_overflow_u32() {
        let item = make_item("1", 100_000, 100_000);
        assert_eq!(item.area(), 10_000_000_000);
    }

    #[test]
    fn enriched_price_is_rating_times_unit_price() {
        let metadata = ItemMetadata {
            rating: Rating::try_from(4).unwrap(),
            category: Category::Animals,
        };
        let enriched = EnrichedItem::new(make_item("181913649", 1200, 1200), metadata, 25);
        assert_eq!(enriched.price, 100);
        assert_eq!(enriched.id(), "181913649");
        assert_eq!(enriched.metadata(), metadata);
    }

    #[test]
    fn enriched_item_serializes_flat_camel_case() {
        let metadata = ItemMetadata {
            rating: Rating::try_from(2).unwrap(),
            category: Category::Gaming,
        };
        let enriched = EnrichedItem::new(make_item("87743020", 1200, 800), metadata, 25);
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["id"], "87743020");
        assert_eq!(value["imageRef"], "https://i.imgflip.com/30b1gx.jpg");
        assert_eq!(value["boxCount"], 2);
        assert_eq!(value["rating"], 2);
        assert_eq!(value["category"], "gaming");
        assert_eq!(value["price"], 50);
    }
}
