//! Tests for configuration validation

use group_loader::config::{DispatchPolicy, LoaderConfig};

#[test]
fn test_default_config() {
    let config = LoaderConfig::default();
    assert_eq!(config.concurrency_limit, 2);
    assert_eq!(config.max_retry_times, 3);
    assert_eq!(config.dispatch_policy, DispatchPolicy::RoundRobin);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_concurrency_invalid() {
    let config = LoaderConfig::default().with_concurrency_limit(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_retries_valid() {
    let config = LoaderConfig::default().with_max_retry_times(0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "concurrency_limit": 4,
        "max_retry_times": 1,
        "dispatch_policy": "sticky"
    }"#;

    let config = LoaderConfig::from_json_str(json).unwrap();
    assert_eq!(config.concurrency_limit, 4);
    assert_eq!(config.max_retry_times, 1);
    assert_eq!(config.dispatch_policy, DispatchPolicy::Sticky);
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config = LoaderConfig::from_json_str(r#"{ "concurrency_limit": 8 }"#).unwrap();
    assert_eq!(config.concurrency_limit, 8);
    assert_eq!(config.max_retry_times, 3);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(LoaderConfig::from_json_str(r#"{ "concurrency_limit": 0 }"#).is_err());
    assert!(LoaderConfig::from_json_str("not json").is_err());
}

#[test]
fn test_dispatch_policy_parse() {
    assert_eq!("round-robin".parse::<DispatchPolicy>(), Ok(DispatchPolicy::RoundRobin));
    assert_eq!(" Sticky ".parse::<DispatchPolicy>(), Ok(DispatchPolicy::Sticky));
    assert!("fifo".parse::<DispatchPolicy>().is_err());
}
