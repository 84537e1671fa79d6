// Logging setup. Both calls are explicit and made once, by the binary or by
// whoever embeds the library.

use anyhow::Result;
use tracing::debug;

use crate::model::{LibraryLogging, ModelBackend};

/// Filter used when RUST_LOG is unset.
pub const DEFAULT_FILTER: &str = "artm_constructor=info";

/// Install the global tracing subscriber.
///
/// Honors RUST_LOG, otherwise falls back to `default_filter`. Does nothing
/// if a subscriber is already installed.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();
}

/// Quiet the modeling library's own logger. Process-wide.
pub fn suppress_library_logging<B: ModelBackend>(backend: &mut B, min_log_level: u8) -> Result<()> {
    backend.configure_logging(LibraryLogging { min_log_level })?;
    debug!(min_log_level, "Library logging suppressed");
    Ok(())
}
