//! Integration tests for the bundled backends driven through the loader.

use std::time::Duration;

use group_loader::builders::LoaderBuilder;
use group_loader::core::{ChannelEventSink, LoadBackend, LoadError, LoaderEvent, ResourceItem};
use group_loader::infra::{FileSystemBackend, InMemoryBackend, ResourceStore};
use tokio::sync::mpsc::UnboundedReceiver;

async fn wait_terminal(rx: &mut UnboundedReceiver<LoaderEvent>) -> Vec<LoaderEvent> {
    let mut events = Vec::new();
    loop {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for loader events")
            .expect("event channel closed");
        let done = event.is_terminal();
        events.push(event);
        if done {
            return events;
        }
    }
}

#[tokio::test]
async fn test_in_memory_backend_load_and_save() {
    let backend = InMemoryBackend::new();
    backend.insert("cfg/game.json", br#"{"lives":3}"#.to_vec());

    let item = ResourceItem::new("game_cfg", "cfg/game.json", "json");
    let payload = backend.load(&item).await.unwrap();
    backend.save(&item, payload);

    let stored = backend.store().get("game_cfg").unwrap();
    assert_eq!(stored.kind, "json");
    assert_eq!(&stored.bytes[..], br#"{"lives":3}"#);
    assert!(stored.saved_at_ms > 0);
}

#[tokio::test]
async fn test_in_memory_backend_missing_url() {
    let backend = InMemoryBackend::new();
    let item = ResourceItem::new("ghost", "nowhere.bin", "bin");
    let err = backend.load(&item).await.unwrap_err();
    assert!(matches!(err, LoadError::NotFound(ref url) if url == "nowhere.bin"));
}

#[tokio::test]
async fn test_in_memory_backend_injected_failures_recover() {
    let store = ResourceStore::new();
    let backend = InMemoryBackend::with_store(store.clone()).with_latency(Duration::from_millis(2));
    backend.insert("a.bin", vec![1, 2, 3]);
    backend.insert("b.bin", vec![4]);
    backend.fail_times("a", 2);

    let (sink, mut rx) = ChannelEventSink::channel();
    let loader = LoaderBuilder::new(backend)
        .concurrency_limit(1)
        .event_sink(sink)
        .build()
        .unwrap();

    loader.load_group(
        vec![
            ResourceItem::new("a", "a.bin", "bin"),
            ResourceItem::new("b", "b.bin", "bin"),
        ],
        "pack",
    );
    let events = wait_terminal(&mut rx).await;

    assert_eq!(
        events.last(),
        Some(&LoaderEvent::GroupComplete {
            group_name: "pack".to_string()
        })
    );
    assert_eq!(store.names(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(loader.stats().retries_scheduled, 2);
}

#[tokio::test]
async fn test_filesystem_backend_group() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("ui")).unwrap();
    std::fs::write(dir.path().join("ui/bg.png"), b"png-bytes").unwrap();
    std::fs::write(dir.path().join("ui/font.fnt"), b"font-bytes").unwrap();

    let backend = FileSystemBackend::new(dir.path());
    let store = backend.store().clone();
    let (sink, mut rx) = ChannelEventSink::channel();
    let loader = LoaderBuilder::new(backend)
        .event_sink(sink)
        .build()
        .unwrap();

    loader.load_group(
        vec![
            ResourceItem::new("bg", "ui/bg.png", "image"),
            ResourceItem::new("font", "ui/font.fnt", "font"),
        ],
        "ui",
    );
    let events = wait_terminal(&mut rx).await;

    assert!(matches!(events.last(), Some(LoaderEvent::GroupComplete { .. })));
    assert_eq!(&store.get("bg").unwrap().bytes[..], b"png-bytes");
    assert_eq!(store.get("font").unwrap().kind, "font");
}

#[tokio::test]
async fn test_filesystem_backend_missing_file_fails_group() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("present.txt"), b"ok").unwrap();

    let (sink, mut rx) = ChannelEventSink::channel();
    let loader = LoaderBuilder::new(FileSystemBackend::new(dir.path()))
        .max_retry_times(0)
        .event_sink(sink)
        .build()
        .unwrap();

    loader.load_group(
        vec![
            ResourceItem::new("present", "present.txt", "text"),
            ResourceItem::new("absent", "absent.txt", "text"),
        ],
        "docs",
    );
    let events = wait_terminal(&mut rx).await;

    let failed: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            LoaderEvent::ItemLoadError { item, .. } => Some(item.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec!["absent"]);
    assert_eq!(
        events.last(),
        Some(&LoaderEvent::GroupLoadError {
            group_name: "docs".to_string()
        })
    );
    assert!(loader.backend().store().contains("present"));
    assert!(!loader.backend().store().contains("absent"));
}
