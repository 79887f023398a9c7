//! Tracing setup for applications embedding `regional-pricing`.
//!
//! The engine only emits `tracing` events. Hosts either call
//! [`init_default_tracing`] or install their own subscriber.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is on.
///
/// `RUST_LOG` wins over `default_filter` when set. Returns `false` when the
/// feature is disabled or a global subscriber already exists.
#[must_use]
pub fn init_default_tracing(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}
