use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a subscriber that writes through the test harness.
/// Use RUST_LOG to raise the level (e.g., RUST_LOG=debug cargo test).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Several tests call this; only the first install wins
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(filter)
        .try_init();
}
