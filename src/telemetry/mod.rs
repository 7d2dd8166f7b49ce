use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `moneysim=info`. Calling it more than once is a no-op.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moneysim=info"));

        // another subscriber may already be installed by the host application
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
