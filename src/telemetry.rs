//! Opt-in `tracing` setup for hosts without their own subscriber.
//!
//! The engine logs pass boundaries at `debug` (aggregation, layout, render)
//! and selection carry-over at `trace`; measurement fallbacks are `warn`.

/// Default directives used when `RUST_LOG` is unset.
pub const DEFAULT_TRACING_FILTER: &str = "warn,dumbbell_rs=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_TRACING_FILTER`] when it is unset.
///
/// Returns `false` without the `telemetry` feature or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] with caller-chosen fallback directives,
/// e.g. `"dumbbell_rs=trace"` while debugging selection carry-over.
#[must_use]
pub fn init_tracing_with_default_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}
