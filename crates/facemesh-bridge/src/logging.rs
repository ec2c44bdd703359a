//! Logging setup for hosts that want the bridge's tracing output.
//!
//! The bridge only emits `tracing` events; nothing is printed until a host
//! calls [`init`] (or `facemesh_init_logging` over the C ABI) or installs
//! its own subscriber.

use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize tracing with the default `info` filter.
///
/// The filter can be overridden via the `RUST_LOG` environment variable:
/// - RUST_LOG=facemesh_bridge=debug
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with a custom default filter.
///
/// Only the first call has any effect. If the host already installed a
/// global subscriber, that one is kept.
pub fn init_with_filter(default_filter: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
            .is_ok();

        if installed {
            info!("facemesh bridge v{} logging initialized", env!("CARGO_PKG_VERSION"));
        }
    });
}
