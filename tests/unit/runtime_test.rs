//! Tests for tokio spawner and API models

use std::time::Duration;

use group_loader::builders::LoaderBuilder;
use group_loader::core::{ResourceItem, Spawn};
use group_loader::infra::InMemoryBackend;
use group_loader::runtime::api::{self, GroupState, GroupSubmission};
use group_loader::runtime::tokio_spawner::TokioSpawner;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_tokio_spawner_outside_runtime() {
    assert!(TokioSpawner::try_current().is_none());
}

#[tokio::test]
async fn test_api_submit_and_status() {
    let backend = InMemoryBackend::new().with_latency(Duration::from_millis(50));
    backend.insert("a.bin", vec![1]);
    let loader = LoaderBuilder::new(backend).build().unwrap();

    let resp = api::submit_group(
        &loader,
        GroupSubmission {
            group_name: "pack".to_string(),
            items: vec![ResourceItem::new("a", "a.bin", "bin")],
        },
    );
    assert_eq!(resp.state, GroupState::Loading);
    assert_eq!(resp.loaded_count, Some(0));
    assert_eq!(resp.total, Some(1));
    assert!(resp.reason.is_none());

    let snapshot = api::snapshot(&loader);
    assert_eq!(snapshot.active_groups, vec!["pack".to_string()]);
    assert_eq!(snapshot.stats.in_flight, 1);
}

#[tokio::test]
async fn test_api_rejected_submission_reports_reason() {
    let loader = LoaderBuilder::new(InMemoryBackend::new()).build().unwrap();
    let resp = api::submit_group(
        &loader,
        GroupSubmission {
            group_name: "empty".to_string(),
            items: Vec::new(),
        },
    );
    assert_eq!(resp.state, GroupState::Idle);
    assert_eq!(resp.reason.as_deref(), Some("group `empty` has no items"));
}

#[test]
fn test_group_submission_from_json() {
    let json = r#"{
        "group_name": "ui",
        "items": [
            { "name": "bg", "url": "ui/bg.png", "kind": "image" }
        ]
    }"#;
    let req: GroupSubmission = serde_json::from_str(json).unwrap();
    assert_eq!(req.items.len(), 1);
    assert_eq!(req.items[0].kind, "image");
}

#[test]
fn test_health() {
    assert!(api::health().ok);
}
