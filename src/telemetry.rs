//! Telemetry helpers for hosts embedding `balance-chart`.
//!
//! Tracing setup stays opt-in: hosts either call `init_default_tracing` or
//! install their own subscriber. Gesture events log at `trace`, scale rebuilds
//! at `debug` and swallowed haptic/measurement failures at `warn`.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is on.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
/// Returns `false` when the feature is disabled or the host already installed
/// a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
