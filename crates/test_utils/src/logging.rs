//! Test logging
//!
//! Routes `tracing` output through the test harness so it only shows for
//! failing tests. Respects `RUST_LOG`, defaulting to `debug` for the ledger
//! crates.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("domain_bill=debug,domain_receipt=debug"));

    // another harness may have installed a subscriber already
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
});

/// Installs the test subscriber once per process
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
