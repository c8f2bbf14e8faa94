// Observability Infrastructure
// Structured logging and lightweight metrics for the harness. Initialization is
// idempotent so tests and the CLI can both call it without coordination.

use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Global atomic counters for metrics
static METRIC_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Initialize the logging and tracing infrastructure with default verbosity.
pub fn init_logging() -> Result<()> {
    init_logging_with_level(false, false)
}

/// Initialize logging with configurable verbosity.
///
/// Quiet takes precedence over `RUST_LOG`: when set, only errors are emitted
/// regardless of the environment. Otherwise `RUST_LOG` overrides the flag-based
/// default.
pub fn init_logging_with_level(verbose: bool, quiet: bool) -> Result<()> {
    let filter_level = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("mockslow=debug,info")
    } else {
        EnvFilter::new("mockslow=info,warn")
    };

    let env_filter = if quiet {
        EnvFilter::new("error")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::try_from_default_env().unwrap_or(filter_level)
    } else {
        filter_level
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(!quiet)
        .with_ansi(true);

    match tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        Ok(()) => {
            if !quiet {
                info!("mockslow observability initialized");
            }
            Ok(())
        }
        Err(_) => {
            // Already initialized, which is fine in test environments
            Ok(())
        }
    }
}

/// Metric types the harness emits.
#[derive(Debug, Clone)]
pub enum MetricType {
    Counter {
        name: &'static str,
        value: u64,
    },
    Timer {
        name: &'static str,
        duration: Duration,
    },
}

/// Record a metric through the logging pipeline.
pub fn record_metric(metric: MetricType) {
    METRIC_COUNTER.fetch_add(1, Ordering::Relaxed);
    match metric {
        MetricType::Counter { name, value } => {
            debug!(metric = name, value, "counter");
        }
        MetricType::Timer { name, duration } => {
            debug!(
                metric = name,
                duration_ns = duration.as_nanos() as u64,
                "timer"
            );
        }
    }
}

/// Total number of metrics recorded since process start.
pub fn metrics_recorded() -> u64 {
    METRIC_COUNTER.load(Ordering::Relaxed)
}
