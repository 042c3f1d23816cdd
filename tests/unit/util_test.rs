//! Tests for utility functions

use group_loader::util::{init_tracing, now_ms};

#[test]
fn test_now_ms_advances() {
    let first = now_ms();
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(now_ms() >= first);
    assert!(first > 0);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::debug!("tracing initialised twice without panicking");
}
