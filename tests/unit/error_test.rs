//! Tests for error types

use group_loader::core::{LoadError, LoaderError};

#[test]
fn test_empty_group_error() {
    let err = LoaderError::EmptyGroup("ui".to_string());
    assert_eq!(format!("{}", err), "group `ui` has no items");
}

#[test]
fn test_missing_group_name_error() {
    let err = LoaderError::MissingGroupName;
    assert_eq!(format!("{}", err), "group name is empty");
}

#[test]
fn test_invalid_config_error() {
    let err = LoaderError::InvalidConfig("concurrency_limit must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: concurrency_limit must be greater than 0"
    );
}

#[test]
fn test_load_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: LoadError = io.into();
    assert!(matches!(err, LoadError::Io(_)));
    assert_eq!(format!("{}", err), "i/o error: denied");
}

#[test]
fn test_load_error_not_found() {
    let err = LoadError::NotFound("ui/bg.png".to_string());
    assert_eq!(format!("{}", err), "resource not found: ui/bg.png");
}
