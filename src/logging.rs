//! Tracing setup for operator-facing notes and diagnostics.
//!
//! Progress notes (`info!`) go to stderr; the reconciled file is the product
//! output. `--quiet` raises the default filter to `warn` so notes disappear,
//! replacing the original tool's global mutable quiet flag. `RUST_LOG` still
//! overrides either default.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber once at startup.
///
/// Default filter: `github_todotxt=info` (or `warn` with `quiet`), overridden
/// by `RUST_LOG` when set. Output: stderr, compact format, no timestamps or
/// targets, since the notes read like console output.
pub fn init(quiet: bool) {
    let default = if quiet { "warn" } else { "github_todotxt=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .compact(),
        )
        .init();
}
