//! Tests for the in-memory resource store

use group_loader::core::ResourceItem;
use group_loader::infra::store::ResourceStore;

#[test]
fn test_store_insert_and_get() {
    let store = ResourceStore::new();
    let item = ResourceItem::new("logo", "img/logo.png", "image");
    store.insert(&item, vec![0x89, 0x50]);

    let stored = store.get("logo").unwrap();
    assert_eq!(stored.url, "img/logo.png");
    assert_eq!(&stored.bytes[..], &[0x89_u8, 0x50]);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_store_clones_share_entries() {
    let store = ResourceStore::new();
    let view = store.clone();
    store.insert(&ResourceItem::new("a", "a", "bin"), vec![1]);
    assert!(view.contains("a"));

    assert!(view.remove("a").is_some());
    assert!(store.is_empty());
}

#[test]
fn test_store_overwrites_same_name() {
    let store = ResourceStore::new();
    store.insert(&ResourceItem::new("a", "v1", "bin"), vec![1]);
    store.insert(&ResourceItem::new("a", "v2", "bin"), vec![2]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").unwrap().url, "v2");
    assert_eq!(store.names(), vec!["a".to_string()]);
}
