// src/telemetry.rs

//! Installs the `tracing` subscriber used by the demo binaries.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt as tracing_fmt};

/// Directive used when `RUST_LOG` is unset or does not parse.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`].
fn resolve_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs a global fmt subscriber writing to stderr, so stdout carries only
/// the demo output.
///
/// Returns `false` when a global subscriber was already set; the existing one
/// is kept.
pub fn init_tracing() -> bool {
    let fmt_layer = tracing_fmt::layer().with_writer(std::io::stderr).with_target(false);
    Registry::default()
        .with(fmt_layer)
        .with(resolve_filter())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_harmless() {
        init_tracing();
        assert!(!init_tracing());
        tracing::info!("still logging");
    }
}
