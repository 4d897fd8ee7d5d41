//! Tracing setup shared by the binary and tests.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "mystery_encounters_engine=info";

/// Install the global subscriber: `RUST_LOG` if set, otherwise `default_filter`.
///
/// Returns `false` when a subscriber was already installed (tests call this
/// repeatedly).
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
