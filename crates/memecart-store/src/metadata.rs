//! Stable per-item classification, generated once and remembered forever.

use std::collections::BTreeMap;
use std::sync::Arc;

use memecart_core::{CatalogItem, Category, EnrichedItem, ItemMetadata, Rating};
use rand::Rng;

use crate::cell::DurableCell;
use crate::medium::StorageMedium;

/// Storage key for the metadata record. The suffix is the schema version.
pub const METADATA_KEY: &str = "memecart.metadata.v1";

/// Persisted `id -> {rating, category}` mapping. Entries are only ever added.
pub type MetadataRecord = BTreeMap<String, ItemMetadata>;

/// Enriches raw catalog items with a rating, category, and price.
///
/// The first time an id is seen it receives a uniformly random rating and
/// category; every later pass reuses that assignment verbatim, including after
/// a restart. New assignments from one pass are persisted with a single write.
#[derive(Debug)]
pub struct MetadataCache {
    cell: DurableCell<MetadataRecord>,
    unit_price: u32,
}

impl MetadataCache {
    pub fn open(medium: Arc<dyn StorageMedium>, unit_price: u32) -> Self {
        Self {
            cell: DurableCell::open(medium, METADATA_KEY, MetadataRecord::new()),
            unit_price,
        }
    }

    #[must_use]
    pub fn unit_price(&self) -> u32 {
        self.unit_price
    }

    /// Returns the remembered classification for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ItemMetadata> {
        self.cell.get().get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cell.get().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell.get().is_empty()
    }

    /// Enriches `items` using the thread-local RNG for unseen ids.
    pub fn enrich(&mut self, items: &[CatalogItem]) -> Vec<EnrichedItem> {
        let mut rng = rand::rng();
        self.enrich_with(items, &mut rng)
    }

    /// Enriches `items`, drawing classifications for unseen ids from `rng`.
    ///
    /// Output order matches input order. Writes to storage at most once, and
    /// not at all when every id was already known.
    pub fn enrich_with<R: Rng>(&mut self, items: &[CatalogItem], rng: &mut R) -> Vec<EnrichedItem> {
        let unit_price = self.unit_price;
        let mut enriched = Vec::with_capacity(items.len());
        let mut synthesized = 0usize;

        self.cell.update_if(|record| {
            for item in items {
                let metadata = match record.get(&item.id) {
                    Some(existing) => *existing,
                    None => {
                        let fresh = synthesize(rng);
                        record.insert(item.id.clone(), fresh);
                        synthesized += 1;
                        fresh
                    }
                };
                enriched.push(EnrichedItem::new(item.clone(), metadata, unit_price));
            }
            synthesized > 0
        });

        tracing::debug!(
            items = items.len(),
            synthesized,
            known = self.len(),
            "enriched catalog"
        );

        enriched
    }
}

fn synthesize<R: Rng>(rng: &mut R) -> ItemMetadata {
    let rating = Rating::clamped(rng.random_range(Rating::MIN..=Rating::MAX));
    let category = Category::ALL[rng.random_range(0..Category::ALL.len())];
    ItemMetadata { rating, category }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::StorageError;
    use crate::medium::MemoryMedium;

    /// Wraps a [`MemoryMedium`] and counts writes.
    #[derive(Default)]
    struct CountingMedium {
        inner: MemoryMedium,
        writes: AtomicU32,
    }

    impl CountingMedium {
        fn writes(&self) -> u32 {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl StorageMedium for CountingMedium {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn item(id: &str, name: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            image_ref: format!("https://i.imgflip.com/{id}.jpg"),
            width: 500,
            height: 400,
            box_count: 2,
        }
    }

    fn catalog(n: usize) -> Vec<CatalogItem> {
        (0..n)
            .map(|i| item(&format!("{}", 1000 + i), &format!("Meme {i}")))
            .collect()
    }

    #[test]
    fn enrich_preserves_input_order_and_prices() {
        let medium = Arc::new(CountingMedium::default());
        let mut cache = MetadataCache::open(medium, 25);
        let items = catalog(10);
        let enriched = cache.enrich_with(&items, &mut StdRng::seed_from_u64(7));

        assert_eq!(enriched.len(), 10);
        for (raw, rich) in items.iter().zip(&enriched) {
            assert_eq!(raw, &rich.item);
            assert_eq!(rich.price, u32::from(rich.rating.get()) * 25);
            assert!((1..=5).contains(&rich.rating.get()));
        }
    }

    #[test]
    fn enrich_is_idempotent_and_second_pass_does_not_write() {
        let medium = Arc::new(CountingMedium::default());
        let mut cache = MetadataCache::open(medium.clone(), 25);
        let items = catalog(30);

        let first = cache.enrich_with(&items, &mut StdRng::seed_from_u64(1));
        assert_eq!(medium.writes(), 1, "first pass batches into one write");

        let second = cache.enrich_with(&items, &mut StdRng::seed_from_u64(999));
        assert_eq!(first, second);
        assert_eq!(medium.writes(), 1, "second pass must not write");
    }

    #[test]
    fn enrich_is_stable_under_shuffled_refetch() {
        let medium = Arc::new(CountingMedium::default());
        let mut cache = MetadataCache::open(medium, 25);
        let items = catalog(12);
        let first = cache.enrich_with(&items, &mut StdRng::seed_from_u64(3));

        let mut shuffled = items.clone();
        shuffled.reverse();
        shuffled.swap(0, 5);
        let second = cache.enrich_with(&shuffled, &mut StdRng::seed_from_u64(4));

        for rich in &second {
            let original = first.iter().find(|e| e.id() == rich.id()).unwrap();
            assert_eq!(original.metadata(), rich.metadata());
        }
    }

    #[test]
    fn enrich_survives_restart() {
        let medium: Arc<dyn StorageMedium> = Arc::new(MemoryMedium::new());
        let items = catalog(8);

        let first = MetadataCache::open(Arc::clone(&medium), 25)
            .enrich_with(&items, &mut StdRng::seed_from_u64(11));
        let second = MetadataCache::open(Arc::clone(&medium), 25)
            .enrich_with(&items, &mut StdRng::seed_from_u64(12));

        assert_eq!(first, second);
    }

    #[test]
    fn new_ids_are_appended_without_touching_existing() {
        let medium = Arc::new(CountingMedium::default());
        let mut cache = MetadataCache::open(medium.clone(), 25);
        let mut items = catalog(3);
        let first = cache.enrich_with(&items, &mut StdRng::seed_from_u64(5));

        items.push(item("new-id", "Fresh Meme"));
        let second = cache.enrich_with(&items, &mut StdRng::seed_from_u64(6));

        assert_eq!(&second[..3], &first[..]);
        assert_eq!(cache.len(), 4);
        assert!(cache.get("new-id").is_some());
        assert_eq!(medium.writes(), 2);
    }

    #[test]
    fn duplicate_ids_in_one_pass_share_metadata() {
        let medium = Arc::new(CountingMedium::default());
        let mut cache = MetadataCache::open(medium, 25);
        let items = vec![item("dup", "One"), item("dup", "One again")];
        let enriched = cache.enrich_with(&items, &mut StdRng::seed_from_u64(2));
        assert_eq!(enriched[0].metadata(), enriched[1].metadata());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unit_price_change_reprices_without_reclassifying() {
        let medium: Arc<dyn StorageMedium> = Arc::new(MemoryMedium::new());
        let items = catalog(5);
        let at_25 = MetadataCache::open(Arc::clone(&medium), 25)
            .enrich_with(&items, &mut StdRng::seed_from_u64(8));
        let at_10 = MetadataCache::open(Arc::clone(&medium), 10)
            .enrich_with(&items, &mut StdRng::seed_from_u64(9));

        for (a, b) in at_25.iter().zip(&at_10) {
            assert_eq!(a.metadata(), b.metadata());
            assert_eq!(b.price, u32::from(b.rating.get()) * 10);
        }
    }

    #[test]
    fn synthesized_categories_cover_the_fixed_set_only() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let metadata = synthesize(&mut rng);
            assert!(Category::ALL.contains(&metadata.category));
            assert!((1..=5).contains(&metadata.rating.get()));
        }
    }

    #[test]
    fn persisted_record_shape_is_id_to_rating_and_category() {
        let medium = Arc::new(MemoryMedium::new());
        let mut cache = MetadataCache::open(medium.clone(), 25);
        cache.enrich_with(&[item("61579", "One Does Not Simply")], &mut StdRng::seed_from_u64(1));

        let raw = medium.get(METADATA_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value["61579"];
        assert!(entry["rating"].is_u64());
        assert!(entry["category"].is_string());
        assert!(entry.get("price").is_none(), "price must not be persisted");
    }

    #[test]
    fn corrupt_record_falls_back_to_empty() {
        let medium = Arc::new(MemoryMedium::new());
        medium
            .set(METADATA_KEY, r#"{"1":{"rating":9,"category":"gaming"}}"#)
            .unwrap();
        let cache = MetadataCache::open(medium, 25);
        assert!(cache.is_empty());
    }
}
