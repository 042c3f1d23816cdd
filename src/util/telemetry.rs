//! Telemetry helpers for structured logging and tracing.

/// Install a default env-filtered fmt subscriber unless one is already set.
///
/// The filter is read from `RUST_LOG`, e.g. `RUST_LOG=group_loader=debug`.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .try_init();
}
