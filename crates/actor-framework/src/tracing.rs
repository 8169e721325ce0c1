//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Actors log their lifecycle
//! (`Actor started`, `Created`, `Deleted`, `Shutdown`) with an `entity_type` field; callers add their
//! own spans on top.
//!
//! ```bash
//! RUST_LOG=info cargo run      # per-job summaries and created records
//! RUST_LOG=debug cargo run     # full payloads
//! RUST_LOG=quote_merger=debug,actor_framework=info cargo run
//! ```
//!
//! The compact format keeps span names inline (`batch:job: Copied lines`), and module paths are
//! hidden because every actor log line already carries `entity_type`.

use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
