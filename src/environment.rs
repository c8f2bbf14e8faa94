// Environment Adapters - how a run reports its samples
// The original carried two near-identical harnesses for two execution
// environments; here a single harness is parameterized by an adapter that owns
// reporting, and nothing else.

use parking_lot::Mutex;
use tracing::{error, info};

use crate::observability::{record_metric, MetricType};
use crate::types::TimingSample;

/// Reporting seam between the harness and its execution environment.
pub trait Environment {
    fn name(&self) -> &'static str;

    /// Emit one sample. Called once per phase, in protocol order.
    fn report(&self, sample: &TimingSample);
}

/// Plain-console environment: one line per sample on stdout, the sole
/// user-visible artifact of the original demonstration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEnvironment;

impl Environment for ConsoleEnvironment {
    fn name(&self) -> &'static str {
        "console"
    }

    fn report(&self, sample: &TimingSample) {
        println!("{}", sample.report_line());
    }
}

/// Structured-log environment: the same information through tracing, plus a
/// timer metric per phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEnvironment;

impl Environment for TracingEnvironment {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn report(&self, sample: &TimingSample) {
        info!(
            entity = %sample.entity,
            phase = %sample.phase,
            duration_ns = sample.duration.as_nanos() as u64,
            cycles = sample.cycles,
            "{}",
            sample.report_line()
        );
        record_metric(MetricType::Timer {
            name: "harness.phase.duration",
            duration: sample.duration,
        });
    }
}

/// Machine-readable environment: one JSON object per sample on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesEnvironment;

impl Environment for JsonLinesEnvironment {
    fn name(&self) -> &'static str {
        "json"
    }

    fn report(&self, sample: &TimingSample) {
        match serde_json::to_string(sample) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("failed to serialize timing sample: {e}"),
        }
    }
}

/// Test environment: retains every reported sample for later assertion.
#[derive(Debug, Default)]
pub struct CapturingEnvironment {
    samples: Mutex<Vec<TimingSample>>,
}

impl CapturingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> Vec<TimingSample> {
        self.samples.lock().clone()
    }
}

impl Environment for CapturingEnvironment {
    fn name(&self) -> &'static str {
        "capturing"
    }

    fn report(&self, sample: &TimingSample) {
        self.samples.lock().push(*sample);
    }
}
