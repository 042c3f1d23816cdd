//! Tests for builder modules

use group_loader::builders::LoaderBuilder;
use group_loader::config::LoaderConfig;
use group_loader::core::LoaderError;
use group_loader::infra::InMemoryBackend;
use group_loader::runtime::TokioSpawner;

#[test]
fn test_loader_builder_defaults() {
    let builder = LoaderBuilder::new(InMemoryBackend::new());
    assert_eq!(builder.current_config(), &LoaderConfig::default());
}

#[test]
fn test_loader_builder_overrides() {
    let builder = LoaderBuilder::new(InMemoryBackend::new())
        .concurrency_limit(6)
        .max_retry_times(0);
    assert_eq!(builder.current_config().concurrency_limit, 6);
    assert_eq!(builder.current_config().max_retry_times, 0);
}

#[tokio::test]
async fn test_loader_builder_rejects_invalid_config() {
    let result = LoaderBuilder::new(InMemoryBackend::new())
        .concurrency_limit(0)
        .build_with(TokioSpawner::new(tokio::runtime::Handle::current()));
    assert!(matches!(result, Err(LoaderError::InvalidConfig(_))));
}

#[test]
fn test_loader_builder_requires_runtime() {
    let result = LoaderBuilder::new(InMemoryBackend::new()).build();
    assert!(matches!(result, Err(LoaderError::Runtime(_))));
}

#[tokio::test]
async fn test_loader_builder_applies_config() {
    let loader = LoaderBuilder::new(InMemoryBackend::new())
        .config(LoaderConfig::default().with_concurrency_limit(5))
        .build()
        .unwrap();
    assert_eq!(loader.config().concurrency_limit, 5);
    assert_eq!(loader.stats().concurrency_limit, 5);
}

#[test]
fn test_loader_builder_from_env_reports_context() {
    std::env::set_var("GROUP_LOADER_CONCURRENCY_LIMIT", "zero");
    let result = LoaderBuilder::from_env(InMemoryBackend::new());
    std::env::remove_var("GROUP_LOADER_CONCURRENCY_LIMIT");
    let err = match result {
        Ok(_) => panic!("expected a configuration error"),
        Err(e) => e,
    };
    assert!(format!("{err:#}").contains("GROUP_LOADER_CONCURRENCY_LIMIT"));
}
