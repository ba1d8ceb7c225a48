//! End-to-end persistence tests using a real on-disk [`FileMedium`].
//!
//! Each test opens the medium, drops every handle, and reopens it from the
//! same directory to simulate a process restart.

use std::sync::Arc;

use memecart_core::CatalogItem;
use memecart_store::{Cart, FileMedium, MetadataCache, StorageMedium, CART_KEY, METADATA_KEY};

fn item(id: &str, name: &str) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        image_ref: format!("https://i.imgflip.com/{id}.jpg"),
        width: 680,
        height: 438,
        box_count: 3,
    }
}

fn open_medium(dir: &std::path::Path) -> Arc<dyn StorageMedium> {
    Arc::new(FileMedium::open(dir).expect("failed to open file medium"))
}

#[test]
fn metadata_and_cart_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let items = vec![
        item("112126428", "Distracted Boyfriend"),
        item("87743020", "Two Buttons"),
        item("129242436", "Change My Mind"),
    ];

    let (first_pass, cart_lines) = {
        let medium = open_medium(dir.path());
        let mut cache = MetadataCache::open(Arc::clone(&medium), 25);
        let enriched = cache.enrich(&items);

        let mut cart = Cart::open(medium);
        cart.add_item(&enriched[1]);
        cart.add_item(&enriched[1]);
        cart.add_item(&enriched[0]);
        (enriched, cart.lines().to_vec())
    };

    let medium = open_medium(dir.path());
    let mut cache = MetadataCache::open(Arc::clone(&medium), 25);
    assert_eq!(cache.len(), 3);
    let second_pass = cache.enrich(&items);
    assert_eq!(first_pass, second_pass);

    let cart = Cart::open(medium);
    assert_eq!(cart.lines(), cart_lines.as_slice());
    assert_eq!(cart.item_count(), 3);
    assert_eq!(
        cart.total_price(),
        2 * u64::from(first_pass[1].price) + u64::from(first_pass[0].price)
    );
}

#[test]
fn corrupt_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{CART_KEY}.json")), "{{{").unwrap();
    std::fs::write(dir.path().join(format!("{METADATA_KEY}.json")), "[1,2,3]").unwrap();

    let medium = open_medium(dir.path());
    let cart = Cart::open(Arc::clone(&medium));
    let cache = MetadataCache::open(Arc::clone(&medium), 25);

    assert!(cart.is_empty());
    assert!(cache.is_empty());
    assert!(medium.get(CART_KEY).unwrap().is_none());
    assert!(medium.get(METADATA_KEY).unwrap().is_none());
}

#[test]
fn writes_to_removed_directory_are_absorbed() {
    let dir = tempfile::tempdir().unwrap();
    let store_dir = dir.path().join("store");
    let medium = open_medium(&store_dir);
    let mut cart = Cart::open(Arc::clone(&medium));
    let mut cache = MetadataCache::open(medium, 25);

    std::fs::remove_dir_all(&store_dir).unwrap();

    let enriched = cache.enrich(&[item("61579", "One Does Not Simply")]);
    cart.add_item(&enriched[0]);

    assert_eq!(cart.item_count(), 1);
    assert_eq!(cache.len(), 1);
}
